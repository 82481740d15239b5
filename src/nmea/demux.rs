use super::{Decoder, DecoderState};
use crate::cursor;

/// Routes the sentences in `chunk` to `decoders` and returns what is left over
/// along with the number of records decoded.
///
/// See [`demux_with`].
pub fn demux<'a>(decoders: &mut [Decoder], chunk: &'a [u8]) -> (&'a [u8], usize) {
    demux_with(decoders, chunk, |_| {})
}

/// Routes the sentences in `chunk` to `decoders`, calling `on_record` with
/// each decoder right after it completes a sentence.
///
/// Decoders are tried in slice order, not by which start token comes first in
/// the text. The first decoder whose start token is present and whose
/// sentence is terminated consumes through its line terminator, then the scan
/// starts over on the rest. A sentence that is not terminated yet leaves its
/// decoder active and the scan moves on to the next decoder. When a full pass
/// decodes nothing, the rest of the chunk is returned for the caller to carry
/// over.
///
/// Bytes before the matched start token are dropped with the sentence, so a
/// sentence of a lower priority type that precedes it in the same chunk is
/// lost.
pub fn demux_with<'a, F>(decoders: &mut [Decoder], mut chunk: &'a [u8], mut on_record: F) -> (&'a [u8], usize)
where
    F: FnMut(&Decoder),
{
    let mut emitted = 0;
    'scan: while !chunk.is_empty() {
        for decoder in decoders.iter_mut() {
            if !cursor::find(chunk, decoder.start_token()).1 {
                if decoder.state() == DecoderState::Active {
                    log_debug!("{} lost its partial sentence", decoder.kind().as_str());
                    decoder.reset();
                }
                continue;
            }

            let rest = decoder.parse(chunk);
            if decoder.state() == DecoderState::Inactive {
                emitted += 1;
                on_record(decoder);
                chunk = rest;
                continue 'scan;
            }
        }
        break;
    }
    (chunk, emitted)
}
