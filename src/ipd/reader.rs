use super::IpdFramer;
use crate::error::ReadError;
use crate::source::ByteSource;

/// Byte source that strips `+IPD,<len>:` framing from another one.
///
/// Each `read` keeps finding headers and copying payload until `buf` is full
/// or the inner source has nothing more, so payloads of back to back packets
/// come out joined. Bytes outside a packet are dropped.
#[derive(Debug)]
pub struct IpdReader<S> {
    source: S,
    framer: IpdFramer,
}

impl<S: ByteSource> IpdReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            framer: IpdFramer::new(),
        }
    }

    pub fn framer(&self) -> &IpdFramer {
        &self.framer
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: ByteSource> ByteSource for IpdReader<S> {
    type Error = ReadError<S::Error>;

    fn read<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a [u8], Self::Error> {
        if buf.is_empty() {
            return Err(ReadError::ZeroCapacity);
        }

        let mut filled = 0;
        while filled < buf.len() {
            if !self.framer.find(&mut self.source).map_err(ReadError::Source)? {
                break;
            }
            let n = self
                .framer
                .read_packet(&mut self.source, &mut buf[filled..])?
                .len();
            if n == 0 && self.framer.is_complete_header() {
                break;
            }
            filled += n;
        }
        Ok(&buf[..filled])
    }
}
