use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dissect::{DissectLimits, Dissector, FrameEvent, FrameSink};
use schema::{
    CommandTable, DecoderRef, MessageKind, RawDecoder, StructuralDecoder, StructuralError,
    StructuredMessage,
};
use wire::{Transport, MARKER};

const PING: u16 = 0x0310;
const SERVER_TICK: u16 = 0x0307;

struct Opaque;

impl StructuralDecoder for Opaque {
    fn decode(
        &self,
        kind: &MessageKind,
        _payload: &[u8],
    ) -> Result<StructuredMessage, StructuralError> {
        Ok(StructuredMessage::new(kind.clone()))
    }
}

/// Counts frames without keeping them.
#[derive(Default)]
struct Count(usize);

impl FrameSink for Count {
    fn on_frame(&mut self, event: FrameEvent) {
        black_box(event);
        self.0 += 1;
    }
}

fn table() -> Arc<CommandTable> {
    Arc::new(CommandTable::from_entries(
        Transport::Datagram,
        [
            (PING, DecoderRef::Structural(MessageKind::new("GamePingPkg"))),
            (SERVER_TICK, DecoderRef::Raw(RawDecoder::ServerTick)),
        ],
    ))
}

fn datagram_frame(command: u16, sequence: u16, payload: &[u8]) -> Vec<u8> {
    let total = (Transport::Datagram.header_size() + payload.len()) as u16;
    let mut out = MARKER.to_vec();
    out.extend_from_slice(&total.to_le_bytes());
    out.extend_from_slice(&command.to_le_bytes());
    out.extend_from_slice(&sequence.to_le_bytes());
    out.extend_from_slice(&[0; 6]);
    out.extend_from_slice(payload);
    out
}

/// Frames interleaved with noise that is dense in false marker matches.
fn noisy_capture(frames: u16) -> Vec<u8> {
    let mut out = Vec::new();
    for seq in 0..frames {
        out.extend_from_slice(&[0x55, 0x55, 0xAA, 0x00, 0x55, 0x13]);
        let command = if seq % 2 == 0 { PING } else { SERVER_TICK };
        out.extend(datagram_frame(command, seq, &[seq as u8; 48]));
    }
    out
}

fn bench_scan(c: &mut Criterion) {
    let table = table();
    let decoder: Arc<dyn StructuralDecoder> = Arc::new(Opaque);
    let capture = noisy_capture(1024);

    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(capture.len() as u64));
    for chunk in [64usize, 1500, capture.len()] {
        group.bench_with_input(BenchmarkId::new("chunk", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut engine = Dissector::new(
                    Arc::clone(&table),
                    Arc::clone(&decoder),
                    DissectLimits::default(),
                );
                let mut sink = Count::default();
                for read in capture.chunks(chunk) {
                    engine.receive(read, &mut sink).unwrap();
                }
                sink.0
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
