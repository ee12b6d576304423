/// Payload carried by a [`Frame`].
///
/// Payloads are never serialised by the simulator. The only thing the
/// MAC needs to know is how many bytes would go on the air, from which
/// the transmission duration is derived.
///
/// [`Frame`]: crate::frame::Frame
pub trait Data: Send + 'static {
    /// number of bytes of the payload once on the air
    ///
    /// A payload of `0` bytes is valid: the frame still occupies the
    /// medium for the duration of its preamble.
    fn bytes_size(&self) -> u64;
}

impl Data for () {
    fn bytes_size(&self) -> u64 {
        0
    }
}
impl<const S: usize> Data for [u8; S] {
    fn bytes_size(&self) -> u64 {
        S as u64
    }
}
impl Data for Box<[u8]> {
    fn bytes_size(&self) -> u64 {
        self.len() as u64
    }
}
impl Data for Vec<u8> {
    fn bytes_size(&self) -> u64 {
        self.len() as u64
    }
}
impl Data for &'static str {
    fn bytes_size(&self) -> u64 {
        self.len() as u64
    }
}
impl Data for String {
    fn bytes_size(&self) -> u64 {
        self.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload() {
        assert_eq!(().bytes_size(), 0);
        assert_eq!(Vec::<u8>::new().bytes_size(), 0);
    }

    #[test]
    fn sized_payloads() {
        assert_eq!([0u8; 1_500].bytes_size(), 1_500);
        assert_eq!(vec![0u8; 12].into_boxed_slice().bytes_size(), 12);
        assert_eq!("hello world!".bytes_size(), 12);
    }

    #[test]
    fn vec_ignores_spare_capacity() {
        let mut payload = Vec::with_capacity(64);
        payload.extend_from_slice(&[1, 2, 3]);

        assert_eq!(payload.bytes_size(), 3);
    }
}
