// tests/drain_properties.rs

use proptest::prelude::*;
use tokio::sync::{mpsc, watch};

use runcap::exec::drainer::drain;
use runcap::types::StreamKind;

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

proptest! {
    #[test]
    fn drain_returns_every_byte(input in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        let out = block_on(drain(StreamKind::Stdout, &input[..], None, cancel_rx));

        prop_assert_eq!(&out.bytes, &input);
        prop_assert_eq!(out.error, None);

        let newlines = input.iter().filter(|&&b| b == b'\n').count();
        let trailing = usize::from(!input.is_empty() && input.last() != Some(&b'\n'));
        prop_assert_eq!(out.lines, newlines + trailing);
    }

    #[test]
    fn tee_receives_the_same_bytes_in_order(
        lines in proptest::collection::vec("[a-z0-9 ]{0,40}", 0..64)
    ) {
        let input: Vec<u8> = lines.iter().flat_map(|l| format!("{l}\n").into_bytes()).collect();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_cancel_tx, cancel_rx) = watch::channel(false);

        block_on(drain(StreamKind::Stderr, &input[..], Some(&tx), cancel_rx));
        drop(tx);

        let mut teed = Vec::new();
        while let Ok(line) = rx.try_recv() {
            prop_assert_eq!(line.stream, StreamKind::Stderr);
            teed.extend(line.bytes);
        }
        prop_assert_eq!(teed, input);
    }
}
