/// Failure of a read that goes through a [`ByteSource`](crate::source::ByteSource).
///
/// Malformed sentences and fields never show up here, they are absorbed into
/// default field values and match counts.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError<E> {
    #[error("destination buffer has zero capacity")]
    ZeroCapacity,
    #[error("byte source failed: {0:?}")]
    Source(E),
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufError {
    #[error("buffer full, {rejected} bytes rejected")]
    Overflow { rejected: usize },
}
