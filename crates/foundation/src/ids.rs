/// Tag attached to an outbound request.
///
/// Tags are issued in strictly increasing order by a [`SequenceCounter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(pub u64);

impl std::fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request tags and answers whether a tag is still the latest one.
#[derive(Debug, Default, Clone)]
pub struct SequenceCounter {
    latest: Option<RequestSeq>,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> RequestSeq {
        let next = match self.latest {
            Some(RequestSeq(n)) => RequestSeq(n.wrapping_add(1)),
            None => RequestSeq(0),
        };
        self.latest = Some(next);
        next
    }

    pub fn latest(&self) -> Option<RequestSeq> {
        self.latest
    }

    pub fn is_latest(&self, seq: RequestSeq) -> bool {
        self.latest == Some(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::{RequestSeq, SequenceCounter};

    #[test]
    fn only_the_newest_tag_is_latest() {
        let mut seq = SequenceCounter::new();
        let a = seq.next();
        let b = seq.next();
        assert!(a < b);
        assert!(!seq.is_latest(a));
        assert!(seq.is_latest(b));
    }

    #[test]
    fn nothing_is_latest_before_first_issue() {
        let seq = SequenceCounter::new();
        assert!(!seq.is_latest(RequestSeq(0)));
        assert_eq!(seq.latest(), None);
    }
}
