//! Reference constitutive models.
use nalgebra::Matrix3;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

use crate::material::{ConstitutiveModel, ModelTag};
use crate::Real;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LameParameters<T> {
    pub mu: T,
    pub lambda: T,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoungPoisson<T> {
    pub young: T,
    pub poisson: T,
}

impl<T> From<YoungPoisson<T>> for LameParameters<T>
where
    T: Real,
{
    #[replace_float_literals(T::from_f64(literal).unwrap())]
    fn from(params: YoungPoisson<T>) -> Self {
        let YoungPoisson { young, poisson } = params;
        let mu = 0.5 * young / (1.0 + poisson);
        let lambda = 2.0 * mu * poisson / (1.0 - 2.0 * poisson);
        Self { mu, lambda }
    }
}

#[allow(non_snake_case)]
fn infinitesimal_strain_tensor<T: Real>(deformation_gradient: &Matrix3<T>) -> Matrix3<T> {
    let F = deformation_gradient;
    F.symmetric_part() - Matrix3::identity()
}

#[allow(non_snake_case)]
#[replace_float_literals(T::from_f64(literal).unwrap())]
fn green_strain_tensor<T: Real>(deformation_gradient: &Matrix3<T>) -> Matrix3<T> {
    let F = deformation_gradient;
    (F.transpose() * F - Matrix3::identity()) * 0.5
}

/// The linear elastic material model.
///
/// Given Lamé parameters $\mu$ and $\lambda$, the strain energy density is
/// $$
/// \psi(\vec F) = \mu \vec \epsilon : \vec \epsilon
///   + \frac{\lambda}{2} \operatorname{tr}^2(\vec \epsilon),
/// $$
/// where $\vec \epsilon(\vec F) = \frac{\vec F + \vec F^T}{2} - \vec I$ is the
/// infinitesimal strain tensor, and the stress tensor is
/// $$
/// \vec P(\vec F) = 2 \mu \vec \epsilon + \lambda \operatorname{tr}(\vec \epsilon) \vec I.
/// $$
///
/// Note that the model is *not* objective: it is only a valid approximation for small
/// deformations, and a rigid rotation of the current configuration changes its energy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearElasticMaterial<T> {
    lame: LameParameters<T>,
}

impl<T> LinearElasticMaterial<T> {
    pub fn new(lame: LameParameters<T>) -> Self {
        Self { lame }
    }

    pub fn lame_parameters(&self) -> &LameParameters<T> {
        &self.lame
    }
}

impl<T> LinearElasticMaterial<T>
where
    T: Real,
{
    pub fn from_young_poisson(params: YoungPoisson<T>) -> Self {
        Self::new(params.into())
    }
}

#[replace_float_literals(T::from_f64(literal).unwrap())]
impl<T> ConstitutiveModel<T> for LinearElasticMaterial<T>
where
    T: Real + 'static,
{
    fn energy_density(&self, deformation_gradient: &Matrix3<T>) -> T {
        let LameParameters { mu, lambda } = self.lame;
        let eps = infinitesimal_strain_tensor(deformation_gradient);
        mu * eps.dot(&eps) + 0.5 * lambda * eps.trace().powi(2)
    }

    fn first_piola_stress(&self, deformation_gradient: &Matrix3<T>) -> Matrix3<T> {
        let LameParameters { mu, lambda } = self.lame;
        let eps = infinitesimal_strain_tensor(deformation_gradient);
        eps * 2.0 * mu + Matrix3::from_diagonal_element(lambda * eps.trace())
    }

    fn model_tag(&self) -> ModelTag {
        ModelTag::of::<Self>()
    }
}

/// The Saint Venant-Kirchhoff material model.
///
/// This material model is characterized by the strain energy density
/// $$
/// \psi(\vec F) = \mu \vec E : \vec E + \frac{\lambda}{2} \operatorname{tr}^2(\vec E)
/// $$
/// where $\vec E = \frac{1}{2} \left( \vec F^T \vec F - \vec I \right)$ is the Green
/// strain tensor, with stress tensor
/// $$
/// \vec P(\vec F) = \vec F (2 \mu \vec E + \lambda \operatorname{tr}(\vec E) \vec I).
/// $$
///
/// Unlike [`LinearElasticMaterial`], the model is objective.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StVenantKirchhoffMaterial<T> {
    lame: LameParameters<T>,
}

impl<T> StVenantKirchhoffMaterial<T> {
    pub fn new(lame: LameParameters<T>) -> Self {
        Self { lame }
    }

    pub fn lame_parameters(&self) -> &LameParameters<T> {
        &self.lame
    }
}

impl<T> StVenantKirchhoffMaterial<T>
where
    T: Real,
{
    pub fn from_young_poisson(params: YoungPoisson<T>) -> Self {
        Self::new(params.into())
    }
}

#[allow(non_snake_case)]
#[replace_float_literals(T::from_f64(literal).unwrap())]
impl<T> ConstitutiveModel<T> for StVenantKirchhoffMaterial<T>
where
    T: Real + 'static,
{
    fn energy_density(&self, deformation_gradient: &Matrix3<T>) -> T {
        let LameParameters { mu, lambda } = self.lame;
        let E = green_strain_tensor(deformation_gradient);
        mu * E.dot(&E) + 0.5 * lambda * E.trace().powi(2)
    }

    fn first_piola_stress(&self, deformation_gradient: &Matrix3<T>) -> Matrix3<T> {
        let LameParameters { mu, lambda } = self.lame;
        let F = deformation_gradient;
        let E = green_strain_tensor(deformation_gradient);
        F * E * 2.0 * mu + F * lambda * E.trace()
    }

    fn model_tag(&self) -> ModelTag {
        ModelTag::of::<Self>()
    }
}
