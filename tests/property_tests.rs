//! Property-based tests using proptest
//!
//! These tests generate random queues and operation sequences and check the
//! queue against a `VecDeque` model and against the algorithms' postconditions.

use std::cmp::Ordering;
use std::collections::VecDeque;

use linked_queue::{compare, Queue, QueueChain, SortStrategy};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Short values over a small alphabet so that duplicates are common.
fn value() -> impl Strategy<Value = String> {
    "[a-c0-9]{0,3}"
}

fn values(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(value(), 0..max)
}

fn contents(queue: &Queue) -> Vec<String> {
    queue.iter().map(str::to_owned).collect()
}

fn model_sorted(mut v: Vec<String>) -> Vec<String> {
    // `sort_by` is stable, like the queue sort.
    v.sort_by(|a, b| compare(a, b));
    v
}

#[derive(Debug, Clone)]
enum Op {
    InsertHead(String),
    InsertTail(String),
    RemoveHead,
    RemoveTail,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        value().prop_map(Op::InsertHead),
        value().prop_map(Op::InsertTail),
        Just(Op::RemoveHead),
        Just(Op::RemoveTail),
    ]
}

proptest! {
    #[test]
    fn prop_matches_deque_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut queue = Queue::new();
        let mut model: VecDeque<String> = VecDeque::new();

        for op in ops {
            match op {
                Op::InsertHead(v) => {
                    queue.insert_head(&v).unwrap();
                    model.push_front(v);
                }
                Op::InsertTail(v) => {
                    queue.insert_tail(&v).unwrap();
                    model.push_back(v);
                }
                Op::RemoveHead => {
                    let got = queue.remove_head(None).map(|e| e.into_value());
                    prop_assert_eq!(got, model.pop_front());
                }
                Op::RemoveTail => {
                    let got = queue.remove_tail(None).map(|e| e.into_value());
                    prop_assert_eq!(got, model.pop_back());
                }
            }
            prop_assert_eq!(queue.len(), model.len());
        }

        prop_assert!(queue.verify_links());
        prop_assert_eq!(contents(&queue), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_reverse_is_involution(input in values(64)) {
        let mut queue: Queue = input.iter().collect();
        queue.reverse();

        let mut reversed = input.clone();
        reversed.reverse();
        prop_assert_eq!(contents(&queue), reversed);

        queue.reverse();
        prop_assert_eq!(contents(&queue), input);
        prop_assert!(queue.verify_links());
    }

    #[test]
    fn prop_sort_matches_stable_model(input in values(128)) {
        for strategy in [SortStrategy::BottomUp, SortStrategy::TopDown] {
            let mut queue: Queue = input.iter().collect();
            queue.sort_with(strategy);
            prop_assert!(queue.verify_links());
            prop_assert_eq!(contents(&queue), model_sorted(input.clone()));

            // Idempotent.
            queue.sort_with(strategy);
            prop_assert_eq!(contents(&queue), model_sorted(input.clone()));
        }
    }

    #[test]
    fn prop_swap_pairs_model(input in values(40)) {
        let mut queue: Queue = input.iter().collect();
        queue.swap_pairs();

        let mut expected = input.clone();
        for pair in expected.chunks_mut(2) {
            pair.reverse();
        }
        prop_assert_eq!(contents(&queue), expected);
        prop_assert!(queue.verify_links());
    }

    #[test]
    fn prop_merge_equals_sort_of_concat(parts in prop::collection::vec(values(16), 0..6)) {
        let mut queues: Vec<Queue> = parts
            .iter()
            .map(|part| model_sorted(part.clone()).iter().collect())
            .collect();
        let total: usize = parts.iter().map(Vec::len).sum();

        let mut chain = QueueChain::new();
        for queue in queues.iter_mut() {
            chain.push(queue);
        }
        let merged = chain.merge();
        drop(chain);

        if queues.is_empty() {
            prop_assert_eq!(merged, 0);
        } else {
            prop_assert_eq!(merged, total);
            let expected = model_sorted(parts.concat());
            prop_assert_eq!(contents(&queues[0]), expected);
            for queue in &queues[1..] {
                prop_assert!(queue.is_empty());
            }
        }
        for queue in &queues {
            prop_assert!(queue.verify_links());
        }
    }

    #[test]
    fn prop_remove_descending_postcondition(input in values(64)) {
        let mut queue: Queue = input.iter().collect();
        let left = queue.remove_descending();
        let kept = contents(&queue);

        prop_assert_eq!(left, kept.len());
        prop_assert!(queue.verify_links());

        // Nothing kept has a strictly greater value to its right.
        for (i, v) in kept.iter().enumerate() {
            for w in &kept[i + 1..] {
                prop_assert_ne!(compare(v, w), Ordering::Less);
            }
        }

        // Every input element that was dominated is gone, everything else stays.
        let expected: Vec<String> = input
            .iter()
            .enumerate()
            .filter(|(i, v)| input[i + 1..].iter().all(|w| compare(v, w) != Ordering::Less))
            .map(|(_, v)| v.clone())
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn prop_delete_dup_on_sorted(input in values(64)) {
        let sorted = model_sorted(input);
        let mut queue: Queue = sorted.iter().collect();
        let released = queue.delete_dup();

        let expected: Vec<String> = sorted
            .iter()
            .filter(|v| sorted.iter().filter(|w| w == v).count() == 1)
            .cloned()
            .collect();
        prop_assert_eq!(released, sorted.len() - expected.len());
        prop_assert_eq!(contents(&queue), expected);
        prop_assert!(queue.verify_links());
    }

    #[test]
    fn prop_reverse_k_model(input in values(40), k in 1usize..8) {
        let mut queue: Queue = input.iter().collect();
        queue.reverse_k(k).unwrap();

        let mut expected = Vec::with_capacity(input.len());
        let full = input.len() / k * k;
        for chunk in input[..full].chunks(k) {
            expected.extend(chunk.iter().rev().cloned());
        }
        expected.extend(input[full..].iter().cloned());

        prop_assert_eq!(contents(&queue), expected);
        prop_assert!(queue.verify_links());
    }

    #[test]
    fn prop_delete_mid_model(input in values(40)) {
        let mut queue: Queue = input.iter().collect();
        let deleted = queue.delete_mid();

        let mut expected = input.clone();
        if !expected.is_empty() {
            expected.remove(expected.len() / 2);
        }
        prop_assert_eq!(deleted, !input.is_empty());
        prop_assert_eq!(contents(&queue), expected);
        prop_assert!(queue.verify_links());
    }

    #[test]
    fn prop_shuffle_preserves_multiset(input in values(64), seed in any::<u64>()) {
        let mut queue: Queue = input.iter().collect();
        queue.shuffle(&mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(queue.len(), input.len());
        prop_assert!(queue.verify_links());
        prop_assert_eq!(model_sorted(contents(&queue)), model_sorted(input));
    }
}
