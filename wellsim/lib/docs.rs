//! Theoretical background.
//!
//! # Contents
//! - [Units](#units)
//! - [Real and imaginary parts](#real-and-imaginary-parts)
//! - [Laplacians](#laplacians)
//! - [Time stepping](#time-stepping)
//! - [Diagnostics](#diagnostics)
//!
//! # Units
//! Everything in this crate works in units where *ħ* = *m* = 1, so that the
//! time-dependent Schrödinger equation reads
//! ```text
//! ∂ψ      1 ∂²ψ
//! -- = i (- ---- - V ψ)
//! ∂t      2 ∂x²
//! ```
//! Lengths are in units of whatever *L* is taken to mean, energies in units of
//! *ħ*²/(*m* *L*²) when *L* = 1, and times in units of *m* *L*²/*ħ*. The
//! ground-state energy of a box of length *L* is then *π*²/(2 *L*²) ≈ 4.93
//! for *L* = 1, and its period of oscillation is 2 *π* / *E*₁ ≈ 1.27.
//!
//! The spatial domain [0, *L*) is sampled at *N* points
//! ```text
//! x[i] = i δx,    δx = L / N,    i ∊ {0, ..., N - 1}
//! ```
//! with the right endpoint excluded so that the grid is consistent with
//! periodic wraparound.
//!
//! # Real and imaginary parts
//! Rather than work with complex arrays, wavefunctions are stored as a pair of
//! real arrays ψ = ψ*ᵣ* + *i* ψ*ᵢ*. Splitting the equation above gives the
//! coupled real system
//! ```text
//! ∂ψᵣ     1 ∂²ψᵢ
//! --- = - - ---- + V ψᵢ
//! ∂t      2 ∂x²
//!
//! ∂ψᵢ   1 ∂²ψᵣ
//! --- = - ---- - V ψᵣ
//! ∂t    2 ∂x²
//! ```
//! which is what all explicit steppers integrate. The Laplacian is applied to
//! each part independently.
//!
//! # Laplacians
//! Two estimators of ∂²/∂*x*² are provided, both periodic:
//! - **Spectral**: transform to momentum space, multiply by -*k*², and
//!   transform back,
//!   ```text
//!   ∇² f = Re iFFT[ -k² FFT[f] ]
//!   k = 2π fftfreq(N, δx)
//!   ```
//!   This is exact for any function that is a sum of grid-resolvable plane
//!   waves and converges faster than any power of *δx* for smooth periodic
//!   functions. Each application costs *O*(*N* log *N*).
//! - **Finite difference**: the three-point central stencil
//!   ```text
//!   ∇² f[i] = (f[i + 1] - 2 f[i] + f[i - 1]) / δx²
//!   ```
//!   with indices taken modulo *N*. The error is *O*(*δx*²) and each
//!   application costs *O*(*N*).
//!
//! Note that the periodic wrap applies even when the potential describes a hard
//! wall. With the infinite well, the wall samples carry a large but finite
//! potential ([`WALL_HEIGHT`][crate::potential::WALL_HEIGHT]) which suppresses
//! the wavefunction there, and the box eigenstates vanish at *x* = 0 anyway.
//!
//! # Time stepping
//! Writing the system above as ∂ψ/∂*t* = *f*(ψ):
//! - **Euler**: ψ(*t* + *dt*) = ψ(*t*) + *dt* *f*(ψ(*t*)). First order in *dt*
//!   and unconditionally unstable for the Schrödinger equation: each step
//!   multiplies the norm of an eigencomponent with energy *E* by
//!   √(1 + *E*² *dt*²).
//! - **"Crank-Nicolson"**: the `crank-nicolson` stepper performs exactly the
//!   same update as Euler. The name is kept for compatibility with existing
//!   configurations; it is not a semi-implicit scheme.
//! - **Implicit Crank-Nicolson**: the genuine scheme, in Cayley form,
//!   ```text
//!        i dt                  i dt
//!   (1 + ---- H) ψ(t + dt) = (1 - ---- H) ψ(t)
//!         2                     2
//!   ```
//!   with *H* = -∇²/2 + *V* assembled as a dense matrix from the Laplacian
//!   operator. The propagator is unitary whenever *H* is Hermitian, so total
//!   probability is conserved to round-off for any *dt*. The propagator is
//!   computed once (one LU solve against a dense *N*×*N* right-hand side) when
//!   the stepper is built, after which each step is a matrix-vector product.
//! - **RK4**: the classic four-stage scheme, with error *O*(*dt*⁴) per unit
//!   time. It is stable while *E*_max *dt* ≲ 2.8, where *E*_max is the largest
//!   eigenvalue of *H*; for the spectral Laplacian this is roughly
//!   (*π* *N* / *L*)²/2 + max *V*. Each step costs eight Laplacian
//!   applications.
//!
//! None of the steppers renormalize. Any change in total probability is a
//! property of the scheme.
//!
//! # Diagnostics
//! The expected energy of a state is computed by direct quadrature,
//! ```text
//! ⟨E⟩ = δx Σ [ -(ψᵣ ∇²ψᵣ + ψᵢ ∇²ψᵢ) / 2 + V (ψᵣ² + ψᵢ²) ]
//! ```
//! and the total probability as *δx* Σ (ψ*ᵣ*² + ψ*ᵢ*²). Neither divides by
//! the norm, so both are only meaningful relative to their initial values
//! when the initial state is not normalized (e.g. superpositions of box
//! eigenstates, which have norm equal to the number of states).
