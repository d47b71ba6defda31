use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use torus_profiles::{AffectedProfile, CoreProfiles, Grid};

use super::bootstrap_current_source::BootstrapCurrentSourceBuilder;
use super::bremsstrahlung_heat_sink::{BremsstrahlungHeatSinkBuilder, BremsstrahlungParams};
use super::electron_density_sources::GasPuffSourceBuilder;
use super::fusion_heat_source::FusionHeatSourceBuilder;
use super::generic_ion_el_heat_source::GenericIonElHeatSourceBuilder;
use super::ohmic_heat_source::{OhmicHeatSourceBuilder, OhmicParams};
use super::qei_source::{QeiParams, QeiSourceBuilder};
use crate::builder::{BuildSource, BuildStandalone, SourceBuilder};
use crate::error::EvalError;
use crate::models::SourceModels;
use crate::params::{Mode, SourceParams};
use crate::source::Source;
use crate::test_fixtures::{constant, grid, profiles};

fn hot_profiles(grid: &Grid) -> CoreProfiles {
	let core = CoreProfiles::flat(grid, 10.0, 12.0, 1.0);
	let edge = CoreProfiles::flat(grid, 0.2, 0.2, 0.3);
	CoreProfiles::parabolic(grid, &core, &edge)
}

fn limited_qei() -> SourceBuilder {
	SourceBuilder::linked(QeiSourceBuilder::from_params(QeiParams {
		limit_to_sibling_heating: true,
		..QeiParams::default()
	}))
}

#[test]
fn ohmic_without_current_is_zero() {
	let grid = grid();
	let source = OhmicHeatSourceBuilder::with_defaults().unwrap().build().unwrap();
	let out = source.evaluate(&grid, &profiles(&grid)).unwrap();
	assert_eq!(out.get(AffectedProfile::TempEl).unwrap(), grid.zeros().as_slice());
}

#[test]
fn ohmic_heats_with_current() {
	let grid = grid();
	let mut state = profiles(&grid);
	state.j_total = vec![1.0; grid.n_cells()];
	let source = OhmicHeatSourceBuilder::with_defaults().unwrap().build().unwrap();
	let out = source.evaluate(&grid, &state).unwrap();
	assert!(out.get(AffectedProfile::TempEl).unwrap().iter().all(|q| *q > 0.0));
}

#[rstest]
#[case::zero(Mode::Zero, 0.0)]
#[case::prescribed(Mode::Prescribed, 2.5)]
fn mode_overrides_model(#[case] mode: Mode, #[case] expected: f64) {
	let grid = grid();
	let builder = OhmicHeatSourceBuilder::from_params(OhmicParams {
		base: SourceParams {
			mode,
			prescribed_value: 2.5,
			..SourceParams::default()
		},
		..OhmicParams::default()
	});
	let mut state = profiles(&grid);
	state.j_total = vec![1.0; grid.n_cells()];

	let out = builder.build().unwrap().evaluate(&grid, &state).unwrap();
	assert_eq!(
		out.get(AffectedProfile::TempEl).unwrap(),
		vec![expected; grid.n_cells()].as_slice()
	);
}

#[test]
fn bremsstrahlung_is_a_sink() {
	let grid = grid();
	let source = BremsstrahlungHeatSinkBuilder::with_defaults().unwrap().build().unwrap();
	let out = source.evaluate(&grid, &profiles(&grid)).unwrap();
	assert!(out.get(AffectedProfile::TempEl).unwrap().iter().all(|q| *q < 0.0));
}

#[test]
fn relativistic_correction_increases_loss() {
	let grid = grid();
	let state = profiles(&grid);
	let plain = BremsstrahlungHeatSinkBuilder::with_defaults().unwrap().build().unwrap();
	let corrected = BremsstrahlungHeatSinkBuilder::from_params(BremsstrahlungParams {
		use_relativistic_correction: true,
		..BremsstrahlungParams::default()
	})
	.build()
	.unwrap();

	let plain = plain.evaluate(&grid, &state).unwrap();
	let corrected = corrected.evaluate(&grid, &state).unwrap();
	assert!(
		corrected.get(AffectedProfile::TempEl).unwrap()[0]
			< plain.get(AffectedProfile::TempEl).unwrap()[0]
	);
}

#[test]
fn bootstrap_current_follows_pressure_gradient() {
	let grid = Grid::new(25).unwrap();
	let source = BootstrapCurrentSourceBuilder::with_defaults().unwrap().build().unwrap();
	let out = source.evaluate(&grid, &hot_profiles(&grid)).unwrap();
	assert!(out.get(AffectedProfile::Psi).unwrap().iter().all(|j| *j > 0.0));
}

#[test]
fn fusion_heats_hot_plasma() {
	let grid = grid();
	let source = FusionHeatSourceBuilder::with_defaults().unwrap().build().unwrap();
	let out = source.evaluate(&grid, &hot_profiles(&grid)).unwrap();

	let ions = out.get(AffectedProfile::TempIon).unwrap();
	let electrons = out.get(AffectedProfile::TempEl).unwrap();
	assert!(ions[0] > 0.0);
	assert!(electrons[0] > ions[0]);
}

#[test]
fn gas_puff_peaks_at_edge() {
	let grid = Grid::new(20).unwrap();
	let source = GasPuffSourceBuilder::with_defaults().unwrap().build().unwrap();
	let ne = source.evaluate(&grid, &profiles(&grid)).unwrap();
	let ne = ne.get(AffectedProfile::Ne).unwrap();
	assert!(ne[19] > ne[10]);
	assert!((grid.integrate(ne) - 1.0).abs() < 1e-9);
}

#[test]
fn ion_el_split_sums_to_total_power() {
	let grid = Grid::new(40).unwrap();
	let source = GenericIonElHeatSourceBuilder::with_defaults().unwrap().build().unwrap();
	let out = source.evaluate(&grid, &profiles(&grid)).unwrap();

	let total = grid.integrate(out.get(AffectedProfile::TempIon).unwrap())
		+ grid.integrate(out.get(AffectedProfile::TempEl).unwrap());
	assert!((total - 120.0).abs() < 1e-6, "{total}");
}

#[test]
fn qei_moves_heat_from_hotter_electrons_to_ions() {
	let grid = grid();
	let models =
		SourceModels::new([("qei", SourceBuilder::default_linked::<QeiSourceBuilder>().unwrap())])
			.unwrap();
	let out = models
		.get("qei")
		.unwrap()
		.evaluate(&grid, &profiles(&grid))
		.unwrap();

	let ions = out.get(AffectedProfile::TempIon).unwrap();
	let electrons = out.get(AffectedProfile::TempEl).unwrap();
	assert!(ions[0] > 0.0);
	for (i, e) in ions.iter().zip(electrons) {
		assert_eq!(*i, -*e);
	}
}

#[test]
fn qei_is_capped_by_sibling_heating() {
	let grid = grid();
	let models = SourceModels::new([("heating", constant(0.05)), ("qei", limited_qei())]).unwrap();

	let out = models
		.get("qei")
		.unwrap()
		.evaluate(&grid, &profiles(&grid))
		.unwrap();
	assert_eq!(
		out.get(AffectedProfile::TempIon).unwrap(),
		vec![0.05; grid.n_cells()].as_slice()
	);

	let net = models
		.sum_sources(AffectedProfile::TempEl, &grid, &profiles(&grid))
		.unwrap();
	assert_eq!(net, grid.zeros());
}

#[test]
fn qei_outliving_its_aggregate_reports_it() {
	let grid = grid();
	let models = SourceModels::new([("qei", limited_qei())]).unwrap();
	let qei: Arc<dyn Source> = models.get("qei").unwrap();
	drop(models);

	let err = qei.evaluate(&grid, &profiles(&grid)).unwrap_err();
	assert!(matches!(err, EvalError::AggregateDropped { name: "qei" }), "{err:?}");
}
