use glam::{Mat4, Quat, Vec3};

/// A transform decomposed into translation, rotation and scale.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for DecomposedTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl From<DecomposedTransform> for Mat4 {
    fn from(value: DecomposedTransform) -> Self {
        Mat4::from_translation(value.translation)
            * Mat4::from_quat(value.rotation)
            * Mat4::from_scale(value.scale)
    }
}

/// Converts a world-space affine matrix into the target skeleton's
/// translation/rotation/scale convention.
///
/// Conversion is fallible: a degenerate or non-affine matrix has no valid
/// decomposition and must be reported to the caller instead of producing
/// garbage joints.
pub trait TransformConverter {
    fn convert_transform(&self, matrix: &Mat4) -> Option<DecomposedTransform>;
}

/// Default converter: glam decomposition, same target convention as the
/// source scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecomposeConverter;

impl TransformConverter for DecomposeConverter {
    fn convert_transform(&self, matrix: &Mat4) -> Option<DecomposedTransform> {
        if !matrix.is_finite() || matrix.determinant().abs() <= f32::EPSILON {
            return None;
        }
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        if !scale.is_finite() || !rotation.is_finite() || !translation.is_finite() {
            return None;
        }
        Some(DecomposedTransform {
            translation,
            rotation,
            scale,
        })
    }
}

#[cfg(test)]
mod test {
    use glam::{Mat4, Quat, Vec3, Vec4};

    use super::{DecomposeConverter, TransformConverter};

    #[test]
    fn test_decompose_translation() {
        let matrix = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let transform = DecomposeConverter.convert_transform(&matrix).unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_degenerate_matrix_rejected() {
        let zero_scale = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(DecomposeConverter.convert_transform(&zero_scale).is_none());

        let non_finite = Mat4::from_cols(
            Vec4::new(f32::NAN, 0.0, 0.0, 0.0),
            Vec4::Y,
            Vec4::Z,
            Vec4::W,
        );
        assert!(DecomposeConverter.convert_transform(&non_finite).is_none());
    }
}
