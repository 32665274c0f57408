use crate::constants::OMEGA_0;
use crate::error::ConductivityError;
use crate::io::logging::{print_integrated_conductivity, print_kubo_init, print_spectrum};
use crate::io::KuboConfig;
use crate::kubo::angular::{p_mat_int, AngularKind};
use crate::kubo::matrix_elements::calc_mel_sq_mat;
use crate::kubo::occupations::{calc_eig_diff_mat, calc_occ_diff_mat};
use crate::kubo::radial::{r1_int_tensor, r2_int_tensor};
use crate::kubo::sum_rule;
use crate::types::{Component, LogGrid, OrbitalPartition, OrbitalSet, OrbitalSubset};
use crate::utils::{trapz, Timer};
use hashbrown::HashMap;
use log::{debug, log_enabled, Level};
use ndarray::prelude::*;
use ndarray::Zip;
use std::f64::consts::PI;
use std::str::FromStr;

/// Normalized Lorentzian (gamma / pi) / (gamma^2 + (x - x0)^2)
pub fn lorentzian(x: f64, x0: f64, gamma: f64) -> f64 {
    (gamma / PI) / (gamma.powi(2) + (x - x0).powi(2))
}

/// Frequencies that are quadratically spaced between OMEGA_0^2 and `max_freq`.
/// The grid is dense at small frequencies.
pub fn frequency_grid(max_freq: f64, n_freq: usize) -> Array1<f64> {
    Array1::linspace(OMEGA_0, max_freq.sqrt(), n_freq).mapv(|w| w * w)
}

/// Number of electrons that corresponds to an integrated conductivity
/// (Thomas-Reiche-Kuhn sum rule).
pub fn sig_to_n(sig: f64, volume: f64) -> f64 {
    sig * 2.0 * volume / PI
}

/// Frequency-resolved conductivity together with the number of electrons
/// obtained from its integral.
#[derive(Debug, Clone, PartialEq)]
pub struct ConductivitySpectrum {
    pub omega: Array1<f64>,
    pub sigma: Array1<f64>,
    pub n_electrons: f64,
}

impl ConductivitySpectrum {
    /// (omega, sigma) as a [n_freq, 2] array
    pub fn as_pairs(&self) -> Array2<f64> {
        let mut pairs: Array2<f64> = Array2::zeros((self.omega.len(), 2));
        pairs.slice_mut(s![.., 0]).assign(&self.omega);
        pairs.slice_mut(s![.., 1]).assign(&self.sigma);
        pairs
    }

    pub fn len(&self) -> usize {
        self.omega.len()
    }

    pub fn is_empty(&self) -> bool {
        self.omega.is_empty()
    }
}

/// Tensors of a conductivity component that depend on the orbitals only.
#[derive(Debug, Clone)]
struct ComponentTensors {
    r1_int: Array5<f64>,
    r2_int: Array5<f64>,
    mel_sq: Array5<f64>,
}

/// Kubo-Greenwood conductivity of an average-atom model.
///
/// The radial integrals, the squared matrix elements and the angular
/// integrals are computed on demand and kept until the orbitals or the
/// valence orbitals are replaced.
#[derive(Debug, Clone)]
pub struct KuboGreenwood {
    orbitals: OrbitalSet,
    grid: LogGrid,
    nmax: usize,
    lmax: usize,
    partition: OrbitalPartition,
    tensor_cache: HashMap<Component, ComponentTensors>,
    angular_cache: HashMap<(AngularKind, usize), Array3<f64>>,
}

impl KuboGreenwood {
    /// `nmax` and `lmax` restrict the orbitals that enter the sums. `None`
    /// (or zero) takes the dimensions of the eigenvalue array.
    pub fn new(
        orbitals: OrbitalSet,
        grid: LogGrid,
        valence_orbs: &OrbitalSubset,
        nmax: Option<usize>,
        lmax: Option<usize>,
    ) -> Result<Self, ConductivityError> {
        if grid.len() != orbitals.n_grid() {
            return Err(ConductivityError::ShapeMismatch {
                name: "xgrid",
                expected: vec![orbitals.n_grid()],
                found: vec![grid.len()],
            });
        }
        let nmax: usize = nmax.filter(|n| *n > 0).unwrap_or_else(|| orbitals.nmax());
        let lmax: usize = lmax.filter(|l| *l > 0).unwrap_or_else(|| orbitals.lmax());
        if nmax > orbitals.nmax() || lmax > orbitals.lmax() {
            return Err(ConductivityError::InvalidOrbital {
                l: lmax.saturating_sub(1),
                n: nmax.saturating_sub(1),
            });
        }
        let partition: OrbitalPartition = OrbitalPartition::new(lmax, nmax, valence_orbs)?;

        if log_enabled!(Level::Info) {
            print_kubo_init(
                orbitals.n_bands(),
                lmax,
                nmax,
                partition.valence_orbs.len(),
                grid.sphere_volume(),
            );
        }

        Ok(Self {
            orbitals,
            grid,
            nmax,
            lmax,
            partition,
            tensor_cache: HashMap::new(),
            angular_cache: HashMap::new(),
        })
    }

    pub fn from_config(
        orbitals: OrbitalSet,
        grid: LogGrid,
        config: &KuboConfig,
    ) -> Result<Self, ConductivityError> {
        config.validate()?;
        let valence_orbs: OrbitalSubset = OrbitalSubset::new(config.valence_orbitals.clone());
        Self::new(orbitals, grid, &valence_orbs, config.nmax, config.lmax)
    }

    pub fn orbitals(&self) -> &OrbitalSet {
        &self.orbitals
    }

    pub fn grid(&self) -> &LogGrid {
        &self.grid
    }

    pub fn nmax(&self) -> usize {
        self.nmax
    }

    pub fn lmax(&self) -> usize {
        self.lmax
    }

    pub fn all_orbs(&self) -> &OrbitalSubset {
        &self.partition.all_orbs
    }

    pub fn valence_orbs(&self) -> &OrbitalSubset {
        &self.partition.valence_orbs
    }

    pub fn cond_orbs(&self) -> &OrbitalSubset {
        &self.partition.cond_orbs
    }

    pub fn partition(&self) -> &OrbitalPartition {
        &self.partition
    }

    /// Replace the orbitals, the grid stays the same. All cached tensors are dropped.
    pub fn set_orbitals(&mut self, orbitals: OrbitalSet) -> Result<(), ConductivityError> {
        if orbitals.n_grid() != self.grid.len() {
            return Err(ConductivityError::ShapeMismatch {
                name: "eigfuncs",
                expected: vec![self.grid.len()],
                found: vec![orbitals.n_grid()],
            });
        }
        if orbitals.nmax() < self.nmax || orbitals.lmax() < self.lmax {
            return Err(ConductivityError::InvalidOrbital {
                l: self.lmax.saturating_sub(1),
                n: self.nmax.saturating_sub(1),
            });
        }
        self.orbitals = orbitals;
        self.clear_cache();
        Ok(())
    }

    /// Replace the valence orbitals, the conduction orbitals are derived again.
    pub fn set_valence_orbitals(
        &mut self,
        valence_orbs: &OrbitalSubset,
    ) -> Result<(), ConductivityError> {
        self.partition = OrbitalPartition::new(self.lmax, self.nmax, valence_orbs)?;
        self.clear_cache();
        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.tensor_cache.clear();
        self.angular_cache.clear();
    }

    /// Volume of the sphere with the radius of the last grid point.
    pub fn sph_vol(&self) -> f64 {
        self.grid.sphere_volume()
    }

    /// Radial gradient integrals of a component, [band, l1, n1, l2, n2].
    pub fn r1_int(&mut self, component: Component) -> ArrayView5<f64> {
        self.compute_component(component);
        self.tensor_cache[&component].r1_int.view()
    }

    /// Radial overlap integrals of a component, [band, l1, n1, l2, n2].
    pub fn r2_int(&mut self, component: Component) -> ArrayView5<f64> {
        self.compute_component(component);
        self.tensor_cache[&component].r2_int.view()
    }

    /// Squared dipole matrix elements of a component, [band, l1, n1, l2, n2].
    pub fn mel_sq(&mut self, component: Component) -> ArrayView5<f64> {
        self.compute_component(component);
        self.tensor_cache[&component].mel_sq.view()
    }

    /// Integrated conductivity of a single component.
    pub fn sig(&mut self, component: Component) -> f64 {
        let timer: Timer = Timer::start();
        self.compute_component(component);
        let tensors: &ComponentTensors = &self.tensor_cache[&component];
        let (subset_1, subset_2) = self.partition.subsets(component);
        let sig: f64 = self.reduce_sig(tensors.mel_sq.view(), subset_1, subset_2);
        if log_enabled!(Level::Info) {
            print_integrated_conductivity(component, sig, sig_to_n(sig, self.sph_vol()), &timer);
        }
        sig
    }

    pub fn sig_tot(&mut self) -> f64 {
        self.sig(Component::Total)
    }

    pub fn sig_cc(&mut self) -> f64 {
        self.sig(Component::ConductionConduction)
    }

    pub fn sig_cv(&mut self) -> f64 {
        self.sig(Component::ConductionValence)
    }

    pub fn sig_vv(&mut self) -> f64 {
        self.sig(Component::ValenceValence)
    }

    /// Total number of electrons from the TRK sum rule.
    pub fn n_tot(&mut self) -> f64 {
        sig_to_n(self.sig_tot(), self.sph_vol())
    }

    /// Number of free (conduction) electrons from the TRK sum rule.
    pub fn n_free(&mut self) -> f64 {
        sig_to_n(self.sig_cc(), self.sph_vol())
    }

    /// Integrated conductivity from precomputed radial integrals. The
    /// angular integrals are computed for the full lmax of the orbitals.
    /// Both tensors need the shape [band, l1, n1, l2, n2] of the orbitals.
    pub fn calc_sig(
        &self,
        r1_int: ArrayView5<f64>,
        r2_int: ArrayView5<f64>,
        orb_subset_1: &OrbitalSubset,
        orb_subset_2: &OrbitalSubset,
    ) -> Result<f64, ConductivityError> {
        self.check_radial_tensors(&r1_int, &r2_int, orb_subset_1, orb_subset_2)?;
        let lmax: usize = self.orbitals.lmax();
        let p2_int: Array3<f64> = p_mat_int(AngularKind::P2, lmax);
        let p4_int: Array3<f64> = p_mat_int(AngularKind::P4, lmax);
        let mel_sq: Array5<f64> =
            calc_mel_sq_mat(r1_int, r2_int, p2_int.view(), p4_int.view());
        Ok(self.reduce_sig(mel_sq.view(), orb_subset_1, orb_subset_2))
    }

    /// Dynamical conductivity from precomputed radial integrals, the delta
    /// functions of the Kubo-Greenwood expression are broadened to
    /// Lorentzians of width `gamma`.
    pub fn calc_sig_func(
        &self,
        r1_int: ArrayView5<f64>,
        r2_int: ArrayView5<f64>,
        orb_subset_1: &OrbitalSubset,
        orb_subset_2: &OrbitalSubset,
        max_freq: f64,
        n_freq: usize,
        gamma: f64,
    ) -> Result<ConductivitySpectrum, ConductivityError> {
        self.check_radial_tensors(&r1_int, &r2_int, orb_subset_1, orb_subset_2)?;
        KuboConfig {
            gamma,
            max_freq,
            n_freq,
            ..KuboConfig::default()
        }
        .validate()?;
        let lmax: usize = self.orbitals.lmax();
        let p2_int: Array3<f64> = p_mat_int(AngularKind::P2, lmax);
        let p4_int: Array3<f64> = p_mat_int(AngularKind::P4, lmax);
        let mel_sq: Array5<f64> =
            calc_mel_sq_mat(r1_int, r2_int, p2_int.view(), p4_int.view());
        Ok(self.reduce_sig_func(
            mel_sq.view(),
            orb_subset_1,
            orb_subset_2,
            max_freq,
            n_freq,
            gamma,
        ))
    }

    /// Dynamical conductivity of the component with the tag `component`
    /// ("tt", "cc", "cv" or "vv"). An unknown tag is rejected before anything
    /// is computed.
    pub fn cond_tot(
        &mut self,
        component: &str,
        gamma: f64,
        max_freq: f64,
        n_freq: usize,
    ) -> Result<ConductivitySpectrum, ConductivityError> {
        let component: Component = Component::from_str(component)?;
        let config: KuboConfig = KuboConfig {
            component: component.tag().to_string(),
            gamma,
            max_freq,
            n_freq,
            ..KuboConfig::default()
        };
        config.validate()?;

        let timer: Timer = Timer::start();
        self.compute_component(component);
        let tensors: &ComponentTensors = &self.tensor_cache[&component];
        let (subset_1, subset_2) = self.partition.subsets(component);
        let spectrum: ConductivitySpectrum = self.reduce_sig_func(
            tensors.mel_sq.view(),
            subset_1,
            subset_2,
            max_freq,
            n_freq,
            gamma,
        );
        print_spectrum(component, gamma, max_freq, n_freq, spectrum.n_electrons, &timer);
        Ok(spectrum)
    }

    /// Dynamical conductivity with the component and the frequency settings of `config`.
    pub fn cond_tot_with_config(
        &mut self,
        config: &KuboConfig,
    ) -> Result<ConductivitySpectrum, ConductivityError> {
        self.cond_tot(&config.component, config.gamma, config.max_freq, config.n_freq)
    }

    /// Momentum sum rule for the orbital (l, n) with magnetic quantum number
    /// m, one value per band.
    pub fn check_sum_rule(
        &self,
        l: usize,
        n: usize,
        m: i64,
    ) -> Result<Array1<f64>, ConductivityError> {
        sum_rule::check_sum_rule(&self.orbitals, &self.grid, &self.partition.all_orbs, l, n, m)
    }

    fn check_radial_tensors(
        &self,
        r1_int: &ArrayView5<f64>,
        r2_int: &ArrayView5<f64>,
        orb_subset_1: &OrbitalSubset,
        orb_subset_2: &OrbitalSubset,
    ) -> Result<(), ConductivityError> {
        let (lmax, nmax): (usize, usize) = (self.orbitals.lmax(), self.orbitals.nmax());
        let expected: Vec<usize> = vec![self.orbitals.n_bands(), lmax, nmax, lmax, nmax];
        for &(name, tensor) in [("r1_int", r1_int.view()), ("r2_int", r2_int.view())].iter() {
            if tensor.shape() != expected.as_slice() {
                return Err(ConductivityError::ShapeMismatch {
                    name,
                    expected: expected.clone(),
                    found: tensor.shape().to_vec(),
                });
            }
        }
        orb_subset_1.check_bounds(lmax, nmax)?;
        orb_subset_2.check_bounds(lmax, nmax)
    }

    fn angular_integrals(&mut self, lmax: usize) {
        for kind in [AngularKind::P2, AngularKind::P4].iter() {
            if self.angular_cache.contains_key(&(*kind, lmax)) {
                debug!("angular integrals {:?} for lmax = {} taken from cache", kind, lmax);
            } else {
                self.angular_cache
                    .insert((*kind, lmax), p_mat_int(*kind, lmax));
            }
        }
    }

    fn compute_component(&mut self, component: Component) {
        if self.tensor_cache.contains_key(&component) {
            debug!("integrals of component {} taken from cache", component);
        } else {
            let lmax: usize = self.orbitals.lmax();
            self.angular_integrals(lmax);
            let (subset_1, subset_2) = self.partition.subsets(component);
            let r1_int: Array5<f64> = r1_int_tensor(
                self.orbitals.eigfuncs(),
                self.grid.xgrid(),
                subset_1,
                subset_2,
            );
            let r2_int: Array5<f64> = r2_int_tensor(
                self.orbitals.eigfuncs(),
                self.grid.xgrid(),
                subset_1,
                subset_2,
            );
            let mel_sq: Array5<f64> = calc_mel_sq_mat(
                r1_int.view(),
                r2_int.view(),
                self.angular_cache[&(AngularKind::P2, lmax)].view(),
                self.angular_cache[&(AngularKind::P4, lmax)].view(),
            );
            self.tensor_cache.insert(
                component,
                ComponentTensors {
                    r1_int,
                    r2_int,
                    mel_sq,
                },
            );
        }
    }

    /// 2 pi / V sum_k,l1,n1,l2,n2 dos[k,0,l1,n1] mel_sq occ_diff / eig_diff
    fn reduce_sig(
        &self,
        mel_sq: ArrayView5<f64>,
        orb_subset_1: &OrbitalSubset,
        orb_subset_2: &OrbitalSubset,
    ) -> f64 {
        let occ_diff: Array5<f64> =
            calc_occ_diff_mat(self.orbitals.occnums(), orb_subset_1, orb_subset_2);
        let eig_diff: Array5<f64> =
            calc_eig_diff_mat(self.orbitals.eigvals(), orb_subset_1, orb_subset_2);
        let dos_weights: ArrayView4<f64> = self.orbitals.dos_weights();

        // partial sums of the bands are combined in band order
        let mut band_sums: Array1<f64> = Array1::zeros(mel_sq.dim().0);
        Zip::from(&mut band_sums)
            .and(mel_sq.axis_iter(Axis(0)))
            .and(occ_diff.axis_iter(Axis(0)))
            .and(eig_diff.axis_iter(Axis(0)))
            .and(dos_weights.axis_iter(Axis(0)))
            .par_for_each(|band_sum, mel_k, occ_k, eig_k, dos_k| {
                let mut value: f64 = 0.0;
                for ((l1, n1, l2, n2), mel) in mel_k.indexed_iter() {
                    value += dos_k[[0, l1, n1]] * mel * occ_k[[l1, n1, l2, n2]]
                        / eig_k[[l1, n1, l2, n2]];
                }
                *band_sum = value;
            });
        let sig_bare: f64 = band_sums.iter().sum();
        2.0 * PI * sig_bare / self.sph_vol()
    }

    fn reduce_sig_func(
        &self,
        mel_sq: ArrayView5<f64>,
        orb_subset_1: &OrbitalSubset,
        orb_subset_2: &OrbitalSubset,
        max_freq: f64,
        n_freq: usize,
        gamma: f64,
    ) -> ConductivitySpectrum {
        let occ_diff: Array5<f64> =
            calc_occ_diff_mat(self.orbitals.occnums(), orb_subset_1, orb_subset_2);
        let eig_diff: Array5<f64> =
            calc_eig_diff_mat(self.orbitals.eigvals(), orb_subset_1, orb_subset_2);
        let dos_weights: ArrayView4<f64> = self.orbitals.dos_weights();
        let volume: f64 = self.sph_vol();

        // weights dos * mel_sq * occ_diff and the transition energies of all
        // transitions that contribute
        let transitions: Vec<(f64, f64)> = mel_sq
            .indexed_iter()
            .filter_map(|((k, l1, n1, l2, n2), mel)| {
                let weight: f64 = dos_weights[[k, 0, l1, n1]] * mel * occ_diff[[k, l1, n1, l2, n2]];
                if weight != 0.0 {
                    Some((weight, eig_diff[[k, l1, n1, l2, n2]]))
                } else {
                    None
                }
            })
            .collect();
        debug!("{} transitions enter the spectrum", transitions.len());

        let omega: Array1<f64> = frequency_grid(max_freq, n_freq);
        let mut sigma: Array1<f64> = Array1::zeros(n_freq);
        Zip::from(&mut sigma).and(&omega).par_for_each(|sig_w, &w| {
            let value: f64 = transitions
                .iter()
                .map(|&(weight, de)| weight * lorentzian(w, de, gamma) / de)
                .sum();
            *sig_w = 2.0 * PI * value / volume;
        });
        let n_electrons: f64 = sig_to_n(trapz(sigma.view(), omega.view()), volume);

        ConductivitySpectrum {
            omega,
            sigma,
            n_electrons,
        }
    }
}
