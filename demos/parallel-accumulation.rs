//! Hashes a large set in shards on separate threads, then joins the shards with `combine`.
//! Since the digest doesn't depend on how the set was split, the result matches hashing
//! everything on a single thread.

use log::info;
use muhash::accumulator::muhash::MuHash3072;

fn main() {
    env_logger::init();

    let elements: Vec<Vec<u8>> = (0..10_000u32).map(|i| i.to_le_bytes().to_vec()).collect();
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let shard_size = (elements.len() + workers - 1) / workers;

    let handles: Vec<_> = elements
        .chunks(shard_size)
        .map(|shard| {
            let shard = shard.to_vec();
            std::thread::spawn(move || shard.iter().collect::<MuHash3072>())
        })
        .collect();

    let mut joined = MuHash3072::new();
    for handle in handles {
        joined.combine(&handle.join().expect("worker panicked"));
    }
    info!("joined {workers} shards");

    let sequential: MuHash3072 = elements.iter().collect();
    assert_eq!(joined.finalize(), sequential.finalize());
    println!("{}", joined.finalize());
}
