use std::collections::BTreeMap;

use crate::{AffectedProfile, Grid, ProfileError};


/// Contribution of one source term, keyed by the channel it affects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceProfile {
	channels: BTreeMap<AffectedProfile, Vec<f64>>,
}

impl SourceProfile {
	pub fn new() -> Self {
		Self::default()
	}

	/// Zero contribution on each of `channels`.
	pub fn zeros(grid: &Grid, channels: &[AffectedProfile]) -> Self {
		Self::uniform(grid, channels, 0.0)
	}

	/// Constant contribution on each of `channels`.
	pub fn uniform(grid: &Grid, channels: &[AffectedProfile], value: f64) -> Self {
		Self {
			channels: channels
				.iter()
				.map(|&c| (c, vec![value; grid.n_cells()]))
				.collect(),
		}
	}

	/// Sets the contribution for `channel`, checking it against `grid`.
	pub fn insert(
		&mut self,
		grid: &Grid,
		channel: AffectedProfile,
		values: Vec<f64>,
	) -> Result<(), ProfileError> {
		if values.len() != grid.n_cells() {
			return Err(ProfileError::ChannelShape {
				channel,
				expected: grid.n_cells(),
				got: values.len(),
			});
		}
		self.channels.insert(channel, values);
		Ok(())
	}

	/// Builder-style [`Self::insert`].
	pub fn with(
		mut self,
		grid: &Grid,
		channel: AffectedProfile,
		values: Vec<f64>,
	) -> Result<Self, ProfileError> {
		self.insert(grid, channel, values)?;
		Ok(self)
	}

	pub fn get(&self, channel: AffectedProfile) -> Option<&[f64]> {
		self.channels.get(&channel).map(Vec::as_slice)
	}

	/// Channels present, in [`AffectedProfile`] order.
	pub fn channels(&self) -> impl Iterator<Item = AffectedProfile> + '_ {
		self.channels.keys().copied()
	}

	/// Adds this profile's `channel` contribution into `acc`.
	///
	/// A missing channel contributes nothing.
	pub fn accumulate(&self, channel: AffectedProfile, acc: &mut [f64]) {
		if let Some(values) = self.channels.get(&channel) {
			for (a, v) in acc.iter_mut().zip(values) {
				*a += v;
			}
		}
	}
}
