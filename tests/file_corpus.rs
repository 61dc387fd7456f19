use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;

use randompass::corpus::{load_or_refresh, CACHE_FILE_NAME};
use randompass::{generate, FileCorpus, GenerationRequest, Mode, SecureSampler, WordCorpus};

fn write_source(dir: &std::path::Path, words: &str) -> std::path::PathBuf {
    let path = dir.join("words.txt");
    fs::write(&path, words).unwrap();
    path
}

#[test]
fn missing_cache_is_not_available() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = FileCorpus::new(dir.path().join("data"), dir.path().join("nope.txt"));
    let err = corpus.load().unwrap_err();
    assert!(err.is_not_available());
}

#[test]
fn refresh_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "Lemon\ntiger\nthe\nox\ncan't\nlemon\nharbor\n");
    let mut corpus = FileCorpus::new(dir.path().join("data"), source);
    corpus.refresh().unwrap();
    assert!(dir.path().join("data").join(CACHE_FILE_NAME).is_file());
    assert_eq!(corpus.load().unwrap(), vec!["lemon", "tiger", "harbor"]);
}

#[test]
fn refresh_replaces_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "lemon\n");
    let mut corpus = FileCorpus::new(dir.path().join("data"), source.clone());
    corpus.refresh().unwrap();
    fs::write(&source, "tiger\nharbor\n").unwrap();
    corpus.refresh().unwrap();
    assert_eq!(corpus.load().unwrap(), vec!["tiger", "harbor"]);
}

#[test]
fn changed_source_rebuilds_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    let old_source = write_source(dir.path(), "lemon\n");
    let mut corpus = FileCorpus::new(data.clone(), old_source);
    corpus.refresh().unwrap();

    let new_source = dir.path().join("other.txt");
    fs::write(&new_source, "tiger\nharbor\n").unwrap();
    let mut corpus = FileCorpus::new(data, new_source);
    assert!(corpus.load().unwrap_err().is_not_available());
    assert_eq!(load_or_refresh(&mut corpus).unwrap(), vec!["tiger", "harbor"]);
}

#[test]
fn first_load_fetches() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "lemon\ntiger\n");
    let mut corpus = FileCorpus::new(dir.path().join("data"), source);
    assert_eq!(load_or_refresh(&mut corpus).unwrap(), vec!["lemon", "tiger"]);
}

#[test]
fn unreadable_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut corpus = FileCorpus::new(dir.path().join("data"), dir.path().join("missing.txt"));
    let err = load_or_refresh(&mut corpus).unwrap_err();
    assert!(!err.is_not_available());
}

#[test]
fn corrupt_cache_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join(CACHE_FILE_NAME), "not json").unwrap();
    let corpus = FileCorpus::new(data, dir.path().join("words.txt"));
    assert!(!corpus.load().unwrap_err().is_not_available());
}

#[test]
fn passphrase_from_a_file_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "cat\ndog\nfish\n");
    let mut corpus = FileCorpus::new(dir.path().join("data"), source);
    let request = GenerationRequest::new(Mode::Words, 3, Some(Vec::new())).unwrap();
    let mut sampler = SecureSampler::new(StdRng::seed_from_u64(9));
    let secret = generate(&request, &mut sampler, &mut corpus).unwrap();
    let words: String = secret
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .collect();
    let tokens: Vec<&str> = words.split_terminator(' ').collect();
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| ["cat", "dog", "fish"].contains(t)));
}
