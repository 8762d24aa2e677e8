#![no_main]

use std::sync::Arc;

use dissect::{DissectLimits, Dissector, FrameEvent};
use libfuzzer_sys::fuzz_target;
use schema::{
    CommandTable, DecoderRef, MessageKind, RawDecoder, StructuralDecoder, StructuralError,
    StructuredMessage,
};
use wire::Transport;

struct Opaque;

impl StructuralDecoder for Opaque {
    fn decode(
        &self,
        kind: &MessageKind,
        payload: &[u8],
    ) -> Result<StructuredMessage, StructuralError> {
        if payload.first() == Some(&0xFF) {
            return Err(StructuralError {
                kind: kind.clone(),
                reason: "rejected".to_string(),
            });
        }
        Ok(StructuredMessage::new(kind.clone()))
    }
}

fn table(transport: Transport) -> Arc<CommandTable> {
    Arc::new(CommandTable::from_entries(
        transport,
        [
            (0x0101, DecoderRef::Structural(MessageKind::new("HeartBeat"))),
            (0x0310, DecoderRef::Structural(MessageKind::new("GamePingPkg"))),
            (0x0305, DecoderRef::Unresolved("GameStartPkg".to_string())),
            (0x0306, DecoderRef::Raw(RawDecoder::UserAction)),
            (0x0307, DecoderRef::Raw(RawDecoder::ServerTick)),
        ],
    ))
}

fn engine(transport: Transport) -> Dissector {
    Dissector::new(
        table(transport),
        Arc::new(Opaque),
        DissectLimits::for_testing(),
    )
}

fuzz_target!(|data: &[u8]| {
    // First byte picks the read size; the rest is the connection's bytes.
    let Some((&split, bytes)) = data.split_first() else {
        return;
    };
    let chunk = usize::from(split % 64) + 1;

    for transport in [Transport::Stream, Transport::Datagram] {
        let mut whole_engine = engine(transport);
        let mut whole: Vec<FrameEvent> = Vec::new();
        whole_engine
            .receive(bytes, &mut whole)
            .expect("arbitrary input is never fatal");

        let mut chunked_engine = engine(transport);
        let mut chunked: Vec<FrameEvent> = Vec::new();
        for read in bytes.chunks(chunk) {
            chunked_engine
                .receive(read, &mut chunked)
                .expect("arbitrary input is never fatal");
        }

        assert_eq!(whole, chunked);
        assert_eq!(whole_engine.buffered(), chunked_engine.buffered());
        assert_eq!(whole_engine.bound_user(), chunked_engine.bound_user());
    }
});
