//
// Copyright (c) 2025 Nathan Fiedler
//
use gap_vector::{GapVector, Options};
use std::time::Instant;

fn benchmark_gap_vector(coll: &mut GapVector<usize>, size: usize, ops: usize) {
    let start = Instant::now();
    for value in 0..size {
        coll.push(value);
    }
    let duration = start.elapsed();
    println!("gap create: {:?}", duration);

    // test sequenced access for entire collection
    let start = Instant::now();
    for (index, value) in coll.iter().enumerate() {
        assert_eq!(*value, index);
    }
    let duration = start.elapsed();
    println!("gap ordered: {:?}", duration);

    // edits near a cursor that drifts through the collection
    let start = Instant::now();
    let mut cursor = size / 2;
    for _ in 0..ops {
        cursor = (cursor + rand::random_range(0..8)).saturating_sub(4).min(size - 1);
        let value = coll.remove(cursor);
        coll.insert(cursor, value);
    }
    let duration = start.elapsed();
    println!("gap {ops} local remove/insert: {:?}", duration);

    // test random remove and insert operations
    let start = Instant::now();
    for _ in 0..ops / 100 {
        let from = rand::random_range(0..size);
        let to = rand::random_range(0..size - 1);
        let value = coll.remove(from);
        coll.insert(to, value);
    }
    let duration = start.elapsed();
    println!("gap {} random remove/insert: {:?}", ops / 100, duration);

    // sort a range in the middle of the wrapped store
    let start = Instant::now();
    let strategy = coll.sort_range_by(size / 4..size / 2, |a, b| b.cmp(a));
    let duration = start.elapsed();
    println!("gap sort range ({strategy}): {:?}", duration);

    // remove every third element in one pass
    let start = Instant::now();
    coll.retain(|value| value % 3 != 0);
    let duration = start.elapsed();
    println!("gap retain: {:?}", duration);

    // test popping all elements from both ends
    let unused = coll.capacity() - coll.len();
    println!("unused capacity: {unused}");
    let start = Instant::now();
    while !coll.is_empty() {
        coll.pop();
        coll.pop_front();
    }
    let duration = start.elapsed();
    println!("gap pop-all: {:?}", duration);
    println!("gap capacity: {}", coll.capacity());
}

fn benchmark_vector(size: usize, ops: usize) {
    let start = Instant::now();
    let mut coll: Vec<usize> = Vec::new();
    for value in 0..size {
        coll.push(value);
    }
    let duration = start.elapsed();
    println!("vector create: {:?}", duration);

    // test sequenced access for entire collection
    let start = Instant::now();
    for (index, value) in coll.iter().enumerate() {
        assert_eq!(*value, index);
    }
    let duration = start.elapsed();
    println!("vector ordered: {:?}", duration);

    // edits near a cursor that drifts through the collection
    let start = Instant::now();
    let mut cursor = size / 2;
    for _ in 0..ops {
        cursor = (cursor + rand::random_range(0..8)).saturating_sub(4).min(size - 1);
        let value = coll.remove(cursor);
        coll.insert(cursor, value);
    }
    let duration = start.elapsed();
    println!("vector {ops} local remove/insert: {:?}", duration);

    // test random remove and insert operations
    let start = Instant::now();
    for _ in 0..ops / 100 {
        let from = rand::random_range(0..size);
        let to = rand::random_range(0..size - 1);
        let value = coll.remove(from);
        coll.insert(to, value);
    }
    let duration = start.elapsed();
    println!("vector {} random remove/insert: {:?}", ops / 100, duration);

    let start = Instant::now();
    coll[size / 4..size / 2].sort_by(|a, b| b.cmp(a));
    let duration = start.elapsed();
    println!("vector sort range: {:?}", duration);

    let start = Instant::now();
    coll.retain(|value| value % 3 != 0);
    let duration = start.elapsed();
    println!("vector retain: {:?}", duration);

    // test popping all elements from the vector
    let unused = coll.capacity() - coll.len();
    println!("unused capacity: {unused}");
    let start = Instant::now();
    while !coll.is_empty() {
        coll.pop();
    }
    let duration = start.elapsed();
    println!("vector pop-all: {:?}", duration);
    println!("vector capacity: {}", coll.capacity());
}

fn main() {
    let size = 5_000_000;
    println!("creating GapVector of {size} elements...");
    let mut coll: GapVector<usize> = GapVector::with_options(Options {
        initial_capacity: size,
        ..Default::default()
    });
    benchmark_gap_vector(&mut coll, size, 200_000);
    println!("creating Vec of {size} elements...");
    benchmark_vector(size, 200_000);
}
