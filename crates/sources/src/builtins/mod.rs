//! Built-in source terms.
//!
//! Each module declares its params, builder and source, and registers itself
//! with [`crate::register_source`]. Only [`qei_source`] links back.

pub mod bootstrap_current_source;
pub mod bremsstrahlung_heat_sink;
pub mod electron_cyclotron_source;
pub mod electron_density_sources;
pub mod fusion_heat_source;
pub mod generic_current_source;
pub mod generic_ion_el_heat_source;
pub mod ohmic_heat_source;
pub mod qei_source;

#[cfg(test)]
mod tests;
