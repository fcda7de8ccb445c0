//! Controller layer: editor state transitions, display surface seam, and the
//! list/form orchestration that ties them to the items API.

pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod surface;
