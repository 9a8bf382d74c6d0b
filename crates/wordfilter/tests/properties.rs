//! Property tests for masking and deletion.

use proptest::prelude::*;

use wordfilter::{Registry, Trie, MASK};

// Small alphabet so that generated words and texts overlap often.
fn word() -> impl Strategy<Value = String> {
    "[ab黄色]{1,5}"
}

fn text() -> impl Strategy<Value = String> {
    "[ab黄色 .]{0,30}"
}

proptest! {
    #[test]
    fn masked_text_keeps_code_point_length(
        words in prop::collection::vec(word(), 0..8),
        prefix in prop::collection::vec(word(), 0..3),
        suffix in prop::collection::vec(word(), 0..3),
        text in text(),
    ) {
        let registry = Registry::new();
        words.iter().for_each(|w| registry.banned().add(w));
        prefix.iter().for_each(|w| registry.prefix_exceptions().add(w));
        suffix.iter().for_each(|w| registry.suffix_exceptions().add(w));

        let result = registry.query(&text);
        prop_assert_eq!(result.text().chars().count(), text.chars().count());
        prop_assert_eq!(result.exists(), !result.words().is_empty());

        let masked: usize = result.words().iter().map(|w| w.chars().count()).sum();
        let stars_before = text.chars().filter(|&c| c == MASK).count();
        let stars_after = result.text().chars().filter(|&c| c == MASK).count();
        prop_assert_eq!(stars_after, stars_before + masked);
    }

    #[test]
    fn masked_words_are_stored_and_sorted(
        words in prop::collection::vec(word(), 1..8),
        text in text(),
    ) {
        let trie = Trie::new();
        words.iter().for_each(|w| trie.add(w));

        let result = trie.query(&text);
        for found in result.words() {
            prop_assert!(trie.contains(found));
        }
        prop_assert!(result.words().windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn deleting_one_word_keeps_its_relatives(
        short in word(),
        tail in word(),
        others in prop::collection::vec(word(), 0..6),
    ) {
        let long = format!("{short}{tail}");

        let trie = Trie::new();
        trie.add(&short);
        trie.add(&long);
        others.iter().for_each(|w| trie.add(w));
        trie.delete(&short);
        prop_assert!(trie.contains(&long));
        prop_assert!(trie.read_all().contains(&long));
        prop_assert!(trie.query(&long).exists());

        let trie = Trie::new();
        trie.add(&short);
        trie.add(&long);
        others.iter().for_each(|w| trie.add(w));
        trie.delete(&long);
        prop_assert!(trie.contains(&short));
        prop_assert!(trie.query(&short).exists());
    }

    #[test]
    fn delete_restores_listing(
        words in prop::collection::vec(word(), 0..8),
        extra in word(),
    ) {
        let trie = Trie::new();
        words.iter().for_each(|w| trie.add(w));
        let mut before = trie.read_all();
        before.sort();

        trie.add(&extra);
        trie.delete(&extra);
        trie.delete(&extra);

        let mut after = trie.read_all();
        after.sort();
        let expected: Vec<String> = before.into_iter().filter(|w| *w != extra).collect();
        prop_assert_eq!(after, expected);
    }
}
