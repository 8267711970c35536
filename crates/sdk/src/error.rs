/// The kind of error that occurred while talking to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The agent process could not be started.
    Spawn,
    /// A streamed payload could not be decoded.
    Decode,
    /// The stream ended before a result was produced.
    Interrupted,
    /// Any other errors.
    Other,
}
