//! The framing engine: marker scan, header parse, qualification, payload wait.

use std::sync::Arc;

use cursor::ByteCursor;
use schema::{CommandTable, StructuralDecoder};
use tracing::{error, trace};
use wire::{Header, Transport, MARKER};

use crate::dispatch::Dispatcher;
use crate::error::{DissectError, DissectResult};
use crate::event::FrameSink;
use crate::limits::DissectLimits;
use crate::qualify::Qualifier;

/// Where the engine stopped scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Looking for the next marker.
    Seeking,
    /// A qualified header was consumed; waiting for its payload.
    AwaitingPayload {
        /// The pending header.
        header: Header,
        /// Payload bytes still owed by the stream.
        payload_len: usize,
    },
}

/// Per-connection framing engine.
///
/// Owns the connection's cursor, scan state, qualification state and raw
/// scratch buffer. Scan state persists across [`Dissector::receive`] calls,
/// so a frame split across reads is dispatched exactly once, after the read
/// that completes it.
#[derive(Debug)]
pub struct Dissector {
    transport: Transport,
    cursor: ByteCursor,
    phase: ScanPhase,
    qualifier: Qualifier,
    dispatcher: Dispatcher,
    limits: DissectLimits,
    failure: Option<DissectError>,
}

impl Dissector {
    /// Creates the engine of one connection.
    ///
    /// The engine scans the transport `table` was built for.
    #[must_use]
    pub fn new(
        table: Arc<CommandTable>,
        structural: Arc<dyn StructuralDecoder>,
        limits: DissectLimits,
    ) -> Self {
        let transport = table.transport();
        Self {
            transport,
            cursor: ByteCursor::new(),
            phase: ScanPhase::Seeking,
            qualifier: Qualifier::for_transport(transport),
            dispatcher: Dispatcher::new(table, structural),
            limits,
            failure: None,
        }
    }

    /// Transport this engine scans.
    #[must_use]
    pub const fn transport(&self) -> Transport {
        self.transport
    }

    /// Current scan phase.
    #[must_use]
    pub const fn phase(&self) -> &ScanPhase {
        &self.phase
    }

    /// User id bound to the connection (stream transport only).
    #[must_use]
    pub const fn bound_user(&self) -> Option<u32> {
        self.qualifier.bound_user()
    }

    /// Bytes buffered but not yet consumed.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.cursor.bytes_remaining()
    }

    /// Returns `true` once a fatal error has occurred.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.failure.is_some()
    }

    /// Appends one read's bytes and dispatches every frame they complete.
    ///
    /// Returns the number of frames delivered to `sink` by this call. The
    /// first fatal error is returned as-is and poisons the engine: every
    /// later call fails with [`DissectError::Aborted`] without touching the
    /// buffer.
    pub fn receive<S>(&mut self, bytes: &[u8], sink: &mut S) -> DissectResult<usize>
    where
        S: FrameSink + ?Sized,
    {
        if let Some(first) = &self.failure {
            return Err(DissectError::Aborted {
                cause: first.to_string(),
            });
        }

        self.cursor.append(bytes);
        match self.scan(sink) {
            Ok(frames) => {
                if self.cursor.position() >= self.limits.compact_threshold {
                    let released = self.cursor.compact();
                    trace!(released, "compacted connection buffer");
                }
                Ok(frames)
            }
            Err(err) => {
                error!(transport = %self.transport, error = %err, "dissection aborted");
                self.failure = Some(err.clone());
                Err(err)
            }
        }
    }

    fn scan<S>(&mut self, sink: &mut S) -> DissectResult<usize>
    where
        S: FrameSink + ?Sized,
    {
        let mut frames = 0;
        loop {
            let phase = self.phase;
            let (header, payload_len) = match phase {
                ScanPhase::AwaitingPayload {
                    header,
                    payload_len,
                } => (header, payload_len),
                ScanPhase::Seeking => match self.next_header()? {
                    Some(found) => found,
                    None => return Ok(frames),
                },
            };

            if self.cursor.bytes_remaining() < payload_len {
                self.phase = ScanPhase::AwaitingPayload {
                    header,
                    payload_len,
                };
                return Ok(frames);
            }

            let payload = self.cursor.read_bytes(payload_len)?;
            self.phase = ScanPhase::Seeking;
            sink.on_frame(self.dispatcher.dispatch(header, payload));
            frames += 1;
        }
    }

    /// Scans for the next qualified header, consuming it.
    ///
    /// Returns `None` when the buffer runs out; a marker that may still
    /// start a frame is left unconsumed.
    fn next_header(&mut self) -> DissectResult<Option<(Header, usize)>> {
        let field_size = self.transport.field_size();
        // From just past a rejected header back to one byte past its marker.
        let resync = 1 - self.transport.header_size() as isize;

        while self.cursor.bytes_remaining() > 0 {
            if self.cursor.read_u8()? != MARKER[0] {
                continue;
            }
            if self.cursor.bytes_remaining() == 0 {
                self.cursor.seek(-1)?;
                return Ok(None);
            }
            if self.cursor.read_u8()? != MARKER[1] {
                // The rejected byte may itself start a marker.
                self.cursor.seek(-1)?;
                continue;
            }
            if self.cursor.bytes_remaining() < field_size {
                self.cursor.seek(-(MARKER.len() as isize))?;
                return Ok(None);
            }

            let header = Header::parse(self.transport, &mut self.cursor)?;
            if let Some(payload_len) = self.accept(&header) {
                return Ok(Some((header, payload_len)));
            }
            trace!(
                transport = %self.transport,
                command = header.command(),
                total_length = header.total_length(),
                "unqualified marker match"
            );
            self.cursor.seek(resync)?;
        }
        Ok(None)
    }

    /// Returns the payload length if `header` starts a genuine frame.
    fn accept(&mut self, header: &Header) -> Option<usize> {
        let payload_len = header.payload_len()?;
        let total = usize::try_from(header.total_length()).ok()?;
        if total > self.limits.max_frame_bytes {
            return None;
        }
        self.qualifier
            .qualifies(header, self.dispatcher.table())
            .then_some(payload_len)
    }
}
