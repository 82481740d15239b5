use core::convert::Infallible;

/// Where raw receiver bytes come from: a UART, a modem link, a test script.
///
/// `read` fills a prefix of `buf` and returns it. A short read is normal, and
/// an empty slice means no data is available right now. Whether the call
/// blocks is up to the implementation. There are no message boundaries.
pub trait ByteSource {
    type Error;

    fn read<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a [u8], Self::Error>;
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    type Error = T::Error;

    fn read<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a [u8], Self::Error> {
        (**self).read(buf)
    }
}

/// Reads drain the front of the slice.
impl ByteSource for &[u8] {
    type Error = Infallible;

    fn read<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a [u8], Infallible> {
        let n = self.len().min(buf.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(&buf[..n])
    }
}

/// Adapts a non-blocking single byte read, such as a HAL serial `read`, to
/// [`ByteSource`].
///
/// Reads until the buffer is full or the port reports `WouldBlock`.
pub struct NbSource<F>(pub F);

impl<F, E> ByteSource for NbSource<F>
where
    F: FnMut() -> nb::Result<u8, E>,
{
    type Error = E;

    fn read<'a>(&mut self, buf: &'a mut [u8]) -> Result<&'a [u8], E> {
        let mut n = 0;
        while n < buf.len() {
            match (self.0)() {
                Ok(b) => {
                    buf[n] = b;
                    n += 1;
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
        Ok(&buf[..n])
    }
}
