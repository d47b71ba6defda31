use crate::AffectedProfile;

/// Errors raised when profiles do not fit the grid they are evaluated on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
	#[error("grid must have at least one cell")]
	EmptyGrid,

	#[error("profile {profile} has {got} cells, grid has {expected}")]
	ShapeMismatch {
		profile: &'static str,
		expected: usize,
		got: usize,
	},

	#[error("channel {channel} has {got} cells, expected {expected}")]
	ChannelShape {
		channel: AffectedProfile,
		expected: usize,
		got: usize,
	},
}
