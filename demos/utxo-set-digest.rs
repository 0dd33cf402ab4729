//! Computes the MuHash3072 digest of a small UTXO set, and optionally compares it with the value
//! a node reports for the same set.
//!
//! ```text
//! cargo run --example utxo-set-digest -- <muhash from `gettxoutsetinfo muhash`>
//! ```
//!
//! The digest is printed the way nodes print it, with its bytes reversed, so the two strings can
//! be compared directly.

use std::str::FromStr;

use log::info;
use log::warn;
use muhash::accumulator::digest::Digest;
use muhash::accumulator::muhash::MuHash3072;
use muhash::accumulator::utxo::Coin;
use muhash::accumulator::utxo::OutPoint;
use muhash::accumulator::utxo::TxOut;
use muhash::accumulator::utxo::Utxo;

fn main() {
    env_logger::init();

    let created = vec![
        Utxo::new(
            OutPoint::from_txid_hex(
                "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b",
                0,
            )
            .unwrap(),
            Coin::new(TxOut::new(5_000_000_000, vec![0x51]), 1, true),
        ),
        Utxo::new(
            OutPoint::from_txid_hex(
                "0e3e2357e806b6cdb1f70b54c3a3a17b6714ee1f0e68bebb44a74b1efd512098",
                0,
            )
            .unwrap(),
            Coin::new(TxOut::new(5_000_000_000, vec![0x51]), 2, true),
        ),
    ];

    // Connect both outputs, then spend the first one
    let mut acc = MuHash3072::new();
    for utxo in created.iter() {
        acc.insert_utxo(utxo);
    }
    acc.remove_utxo(&created[0]);

    let digest = acc.finalize();
    info!("computed digest for {} utxo(s)", created.len() - 1);
    println!("{digest}");

    if let Some(expected) = std::env::args().nth(1) {
        let expected = Digest::from_str(&expected).expect("expected digest must be 64 hex chars");
        if expected == digest {
            println!("matches");
        } else {
            warn!("node reported {expected}, we computed {digest}");
            std::process::exit(1);
        }
    }
}
