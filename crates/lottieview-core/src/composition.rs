// crates/lottieview-core/src/composition.rs
//
// Parsed Lottie document metadata. Plain data — the JSON / zip parsing that
// produces it lives in lottieview-media::composition.

/// Lottie layer type, from the numeric `ty` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Precomp,
    Solid,
    Image,
    Null,
    Shape,
    Text,
    Other(u8),
}

impl LayerKind {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Precomp,
            1 => Self::Solid,
            2 => Self::Image,
            3 => Self::Null,
            4 => Self::Shape,
            5 => Self::Text,
            n => Self::Other(n),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Precomp  => "precomp",
            Self::Solid    => "solid",
            Self::Image    => "image",
            Self::Null     => "null",
            Self::Shape    => "shape",
            Self::Text     => "text",
            Self::Other(_) => "layer",
        }
    }
}

/// One layer's visible span on the composition timeline, in frames.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpan {
    pub name:      String,
    pub kind:      LayerKind,
    pub in_point:  f32,
    pub out_point: f32,
}

impl LayerSpan {
    /// Lottie layers are visible on [ip, op).
    pub fn is_active(&self, frame: f32) -> bool {
        frame >= self.in_point && frame < self.out_point
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    pub name:       String,
    pub version:    String,
    pub width:      u32,
    pub height:     u32,
    pub in_point:   f32,
    pub out_point:  f32,
    pub frame_rate: f32,
    pub layers:     Vec<LayerSpan>,
}

impl Composition {
    pub fn duration_frames(&self) -> f32 {
        (self.out_point - self.in_point).max(0.0)
    }

    pub fn duration_secs(&self) -> f32 {
        if self.frame_rate <= 0.0 { return 0.0; }
        self.duration_frames() / self.frame_rate
    }

    /// Width / height. Falls back to square for degenerate sizes.
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 { return 1.0; }
        self.width as f32 / self.height as f32
    }

    /// Timeline frame for a normalized progress fraction.
    pub fn frame_at(&self, progress: f32) -> f32 {
        self.in_point + progress.clamp(0.0, 1.0) * self.duration_frames()
    }

    /// Normalized progress fraction for a timeline frame.
    pub fn progress_at(&self, frame: f32) -> f32 {
        let span = self.duration_frames();
        if span <= 0.0 { return 0.0; }
        ((frame - self.in_point) / span).clamp(0.0, 1.0)
    }

    pub fn active_layers(&self, frame: f32) -> impl Iterator<Item = &LayerSpan> {
        self.layers.iter().filter(move |l| l.is_active(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp() -> Composition {
        Composition {
            name:       "bounce".into(),
            version:    "5.7.0".into(),
            width:      400,
            height:     200,
            in_point:   10.0,
            out_point:  70.0,
            frame_rate: 30.0,
            layers: vec![
                LayerSpan { name: "ball".into(),   kind: LayerKind::Shape, in_point: 10.0, out_point: 40.0 },
                LayerSpan { name: "shadow".into(), kind: LayerKind::Shape, in_point: 30.0, out_point: 70.0 },
            ],
        }
    }

    #[test]
    fn duration_and_aspect() {
        let c = comp();
        assert_eq!(c.duration_frames(), 60.0);
        assert!((c.duration_secs() - 2.0).abs() < 1e-6);
        assert!((c.aspect() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn frame_progress_mapping_is_offset_by_in_point() {
        let c = comp();
        assert_eq!(c.frame_at(0.0), 10.0);
        assert_eq!(c.frame_at(0.5), 40.0);
        assert_eq!(c.frame_at(2.0), 70.0);
        assert!((c.progress_at(40.0) - 0.5).abs() < 1e-6);
        assert_eq!(c.progress_at(0.0), 0.0);
    }

    #[test]
    fn active_layers_use_half_open_span() {
        let c = comp();
        let names = |f: f32| c.active_layers(f).map(|l| l.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names(10.0), vec!["ball"]);
        assert_eq!(names(35.0), vec!["ball", "shadow"]);
        assert_eq!(names(40.0), vec!["shadow"]);
        assert!(names(70.0).is_empty());
    }

    #[test]
    fn layer_kind_codes() {
        assert_eq!(LayerKind::from_code(4), LayerKind::Shape);
        assert_eq!(LayerKind::from_code(42), LayerKind::Other(42));
        assert_eq!(LayerKind::Other(9).label(), "layer");
    }
}
