/// Vertex values of the auxiliary graphs built by flow reductions.
///
/// Max-flow reductions of balance and matching problems introduce a super
/// source and a super sink next to the caller's own vertices. Wrapping the
/// caller's values keeps those two artificial vertices out of the caller's
/// value space.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Debug)]
pub enum Node<V> {
    Source,
    Sink,
    WithId(V),
}

impl<V> From<V> for Node<V> {
    fn from(value: V) -> Self {
        Self::WithId(value)
    }
}
