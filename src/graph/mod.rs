// Co-occurrence graph — construction, centrality ranking and layout.

pub mod centrality;
pub mod cooccurrence;
pub mod layout;

pub use cooccurrence::{CooccurrenceGraph, NetworkData, NetworkEdge, NetworkNode};
