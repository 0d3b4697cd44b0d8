#![no_main]

use libfuzzer_sys::fuzz_target;
use shardcache::ds::IntrusiveList;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Random push_front, pop_back, move_to_front, remove, get and clear. Link
// integrity is verified after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut all_ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 7;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                let id = list.push_front(value);
                all_ids.push(id);

                assert_eq!(list.front(), Some(&value));
                assert!(list.contains(id));
                assert_eq!(list.get(id), Some(&value));
            },
            1 => {
                let old_len = list.len();
                let tail = list.back().copied();
                let popped = list.pop_back();

                assert_eq!(popped, tail);
                if popped.is_some() {
                    assert_eq!(list.len(), old_len - 1);
                } else {
                    assert_eq!(old_len, 0);
                }
            },
            2 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    let was_live = list.contains(id);
                    let moved = list.move_to_front(id);

                    assert_eq!(moved, was_live);
                    if moved {
                        assert_eq!(list.front(), list.get(id));
                    }
                }
            },
            3 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    let old_len = list.len();

                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                }
            },
            4 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    assert_eq!(list.get(id).is_some(), list.contains(id));
                }
            },
            5 => {
                assert_eq!(list.iter().count(), list.len());
                assert_eq!(list.is_empty(), list.front().is_none());
                assert_eq!(list.is_empty(), list.back().is_none());
            },
            6 => {
                list.clear();
                all_ids.clear();

                assert!(list.is_empty());
                assert_eq!(list.front(), None);
                assert_eq!(list.back(), None);
            },
            _ => unreachable!(),
        }

        assert!(list.check_links().is_ok());
    }
});
