//! End-to-end scenarios exercised through the public library API rather
//! than any one module's internals.

use corpussift::editdistance::{
    damerau_levenshtein, hamming, hamming_similarity, lcs_length, lcs_similarity, levenshtein,
    levenshtein_similarity,
};
use corpussift::minhash::{bucketize, compute_signature, DedupStore, MinHashConfig};
use corpussift::suffix_array::build_suffix_array;
use corpussift::textprep::prepare_ngrams;

#[test]
fn scenario_levenshtein_kitten_sitting() {
    let a: Vec<char> = "kitten".chars().collect();
    let b: Vec<char> = "sitting".chars().collect();
    assert_eq!(levenshtein(&a, &b), 3);
    assert!((levenshtein_similarity(&a, &b) - 4.0 / 7.0).abs() < 1e-9);
}

#[test]
fn scenario_damerau_vs_levenshtein() {
    let a: Vec<char> = "abcd".chars().collect();
    let b: Vec<char> = "acbd".chars().collect();
    assert_eq!(levenshtein(&a, &b), 2);
    assert_eq!(damerau_levenshtein(&a, &b), 1);
}

#[test]
fn scenario_lcs_aggtab() {
    let a: Vec<char> = "AGGTAB".chars().collect();
    let b: Vec<char> = "GXTXAYB".chars().collect();
    assert_eq!(lcs_length(&a, &b), 4);
    assert!((lcs_similarity(&a, &b) - 4.0 / 7.0).abs() < 1e-9);
}

#[test]
fn scenario_hamming() {
    let a: Vec<char> = "karolin".chars().collect();
    let b: Vec<char> = "kathrin".chars().collect();
    assert_eq!(hamming(&a, &b).unwrap(), 3);

    let c: Vec<char> = "hello".chars().collect();
    let d: Vec<char> = "world!".chars().collect();
    assert!(hamming(&c, &d).is_err());
    assert!(hamming_similarity(&c, &d).is_err());
}

#[test]
fn scenario_suffix_array_banana() {
    let sa = build_suffix_array(b"banana");
    assert_eq!(sa, vec![5, 3, 1, 0, 4, 2]);
}

#[test]
fn scenario_suffix_array_mississippi() {
    let sa = build_suffix_array(b"mississippi");
    assert_eq!(sa, vec![10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
}

#[test]
fn scenario_minhash_lsh_dedup_stream() {
    let config = MinHashConfig {
        ngram: 5,
        bands: 20,
        rows_per_band: 10,
        normalize: true,
    };
    let store = DedupStore::new(config.bands, None);

    let doc_a = "the quick brown fox jumps over the lazy dog near the riverbank";
    // B is A with one character changed.
    let doc_b = "the quick brown fox jumps over the lazy dog near the riverbaqk";
    let doc_c = "completely unrelated content about orbital mechanics and fuel";

    let observe = |text: &str| {
        let ngrams = prepare_ngrams(text, config.ngram, config.normalize).unwrap();
        let sig = compute_signature(&ngrams, &config);
        let buckets = bucketize(&sig);
        store.observe_all(&buckets).unwrap()
    };

    assert!(!observe(doc_a), "first occurrence must not be a duplicate");
    assert!(observe(doc_b), "near-duplicate should collide in at least one band");
    assert!(!observe(doc_c), "disjoint n-gram set must never collide");
}
