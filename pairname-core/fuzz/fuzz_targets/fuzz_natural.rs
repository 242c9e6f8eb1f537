#![no_main]

use libfuzzer_sys::fuzz_target;
use pairname_core::executor::split_extension;
use pairname_core::natural::{natural_cmp, sort_natural};
use std::cmp::Ordering;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let mut names: Vec<String> = input
        .split('/')
        .take(20)
        .map(|s| s.chars().take(100).collect())
        .collect();

    for a in &names {
        assert_eq!(natural_cmp(a, a), Ordering::Equal);
        for b in &names {
            assert_eq!(natural_cmp(a, b), natural_cmp(b, a).reverse());
        }

        let (stem, extension) = split_extension(a);
        assert_eq!(format!("{stem}{extension}"), *a);
    }

    sort_natural(&mut names);
    for window in names.windows(2) {
        assert_ne!(natural_cmp(&window[0], &window[1]), Ordering::Greater);
    }
});
