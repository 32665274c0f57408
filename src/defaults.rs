// CONDUCTIVITY
// component of the conductivity (tt, cc, cv or vv)
pub const COMPONENT: &str = "tt";
// width of the Lorentzian that replaces the delta function
pub const GAMMA: f64 = 0.01;
// upper end of the frequency grid in Hartree
pub const MAX_FREQ: f64 = 50.0;
// number of points in the frequency grid
pub const N_FREQ: usize = 200;
