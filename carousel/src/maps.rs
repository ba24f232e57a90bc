use crate::{
    ArmBounds, ArmCounts, Bounds, HiddenBounds, InterpolationMap, InterpolationMap2D, ItemFrame,
    Point, Scaling, ScalingOptions, Span,
};

/// The maps shared by every item of one selector: slot index → location, scale, opacity and
/// descriptor opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselMaps {
    counts: ArmCounts,
    location: InterpolationMap2D,
    scale: InterpolationMap2D,
    opacity: InterpolationMap,
    descriptor_opacity: InterpolationMap,
}

fn bounds<V: Copy>(
    center: V,
    left: V,
    right: V,
    scaling: Scaling,
    depth: i32,
    options: &ScalingOptions,
) -> Bounds<V> {
    let vanishing_gap = options.clamped_vanishing_gap();
    let arm = |target, pad_points| ArmBounds {
        target,
        pad_points,
        scaling,
        depth,
        vanishing_gap,
    };
    Bounds {
        center,
        left: arm(left, options.pad_left_items),
        right: arm(right, options.pad_right_items),
        hidden: HiddenBounds { scaling, depth },
    }
}

impl CarouselMaps {
    pub fn build(
        counts: ArmCounts,
        left_point: Point,
        right_point: Point,
        options: &ScalingOptions,
    ) -> Self {
        if options.clamped_vanishing_gap() != options.vanishing_gap {
            cwarn!(
                requested = options.vanishing_gap,
                used = options.clamped_vanishing_gap(),
                "vanishing gap clamped"
            );
        }

        let location = InterpolationMap2D::build(
            &bounds(
                Point::ZERO,
                left_point,
                right_point,
                options.location_scaling,
                options.location_scaling_depth,
                options,
            ),
            counts,
        );

        let edge_scale = Point::splat(options.edge_scale);
        let scale = InterpolationMap2D::build(
            &bounds(
                Point::splat(1.0),
                edge_scale,
                edge_scale,
                options.size_scaling,
                options.size_scaling_depth,
                options,
            ),
            counts,
        );

        let opacity = InterpolationMap::build(
            &bounds(
                1.0,
                options.edge_opacity,
                options.edge_opacity,
                options.opacity_scaling,
                options.opacity_scaling_depth,
                options,
            ),
            counts,
        );

        // Descriptors only show around the front slot (and its wrap twin).
        let total = counts.total() as f64;
        let descriptor_opacity = opacity.windowed(
            0.0,
            &[Span::new(0.0, 1.0), Span::new(total - 1.0, total)],
        );

        cdebug!(
            right = counts.right,
            left = counts.left,
            hidden = counts.hidden,
            samples = opacity.len(),
            "CarouselMaps::build"
        );

        Self {
            counts,
            location,
            scale,
            opacity,
            descriptor_opacity,
        }
    }

    pub fn counts(&self) -> ArmCounts {
        self.counts
    }

    pub fn location(&self) -> &InterpolationMap2D {
        &self.location
    }

    pub fn scale(&self) -> &InterpolationMap2D {
        &self.scale
    }

    pub fn opacity(&self) -> &InterpolationMap {
        &self.opacity
    }

    pub fn descriptor_opacity(&self) -> &InterpolationMap {
        &self.descriptor_opacity
    }

    /// Evaluates every map at a (continuous) slot index.
    pub fn frame_at(&self, shown_index: f64) -> ItemFrame {
        ItemFrame {
            location: self.location.sample(shown_index),
            scale: self.scale.sample(shown_index),
            opacity: self.opacity.sample(shown_index),
            descriptor_opacity: self.descriptor_opacity.sample(shown_index),
        }
    }
}
