//! Hand-written collaborators for exercising the controller without a
//! network or a document.

mod stubs;

pub use stubs::{
    FetchCall, RecordedDetailRequest, RecordingBuilder, RecordingDocument,
    StubFetcher, StubLink, StubNode,
};
