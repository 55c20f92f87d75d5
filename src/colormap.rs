use std::marker::PhantomData;
use rgb::{RGB, RGBA, RGBA8};

use crate::{ColorMapKey, ColorRange, Gradient, RGBColor,
            meta::{Category, ColorMapMeta, pretty_name}};

/// A color map loaded from a catalog: its metadata and its samples.
///
/// Immutable once loaded.  A color map knows the key of the catalog
/// it belongs to but does not own it; use
/// [`CatalogStore::catalog`][crate::CatalogStore::catalog] to get the
/// catalog itself.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
    key: ColorMapKey,
    meta: ColorMapMeta,
    samples: Vec<RGB<f64>>, // Invariant: length ≥ 2, components in [0, 1]
}

impl ColorMap {
    /// `samples` must already satisfy the invariants, see
    /// [`check_samples`][crate::samples::check_samples].
    pub(crate) fn new(catalog: &str, mut meta: ColorMapMeta,
                      samples: Vec<RGB<f64>>) -> Self {
        debug_assert!(samples.len() >= 2);
        if meta.pretty_name.is_empty() {
            meta.pretty_name = pretty_name(&meta.name);
        }
        ColorMap { key: ColorMapKey::new(catalog, meta.name.as_str()),
                   meta, samples }
    }

    /// Key of the color map, unique in the store.
    pub fn key(&self) -> &ColorMapKey { &self.key }

    /// Identifier of the color map, unique in its catalog.
    pub fn name(&self) -> &str { &self.meta.name }

    /// Name for display.
    pub fn pretty_name(&self) -> &str { &self.meta.pretty_name }

    /// Key of the catalog the color map belongs to.
    pub fn catalog(&self) -> &str { self.key.catalog() }

    pub fn category(&self) -> Category { self.meta.category }

    pub fn perceptually_uniform(&self) -> bool {
        self.meta.perceptually_uniform
    }

    pub fn tags(&self) -> &[String] { &self.meta.tags }

    /// All metadata, as read from the JSON file.
    pub fn meta(&self) -> &ColorMapMeta { &self.meta }

    /// Returns the number of samples.
    ///
    /// Color maps contain at least 2 samples.
    pub fn len(&self) -> usize { self.samples.len() }

    /// Returns the samples, components in \[0, 1\].
    pub fn samples(&self) -> &[RGB<f64>] { &self.samples }

    /// Returns the samples as colors.
    pub fn colors<Color: RGBColor>(&self) -> Vec<Color> {
        self.samples.iter().map(|&c| Color::from_rgba(to_rgba(c))).collect()
    }

    /// Returns the samples as opaque 8 bits colors, suitable for
    /// drawing a color bar.  Components are scaled by 256 and clipped
    /// to \[0, 255\].
    pub fn rgba8(&self) -> Vec<RGBA8> {
        let byte = |x: f64| (x * 256.).clamp(0., 255.) as u8;
        self.samples.iter()
            .map(|c| RGBA8 { r: byte(c.r), g: byte(c.g), b: byte(c.b), a: 255 })
            .collect()
    }

    /// Returns the color map as a range interpolating linearly in RGB
    /// between consecutive samples.
    ///
    /// ```
    /// # use color_catalog::ColorRange;
    /// # fn f(cm: &color_catalog::ColorMap) {
    /// let mid: rgb::RGB8 = cm.lut().rgb(0.5);
    /// # }
    /// ```
    pub fn lut<Color: RGBColor>(&self) -> Lut<'_, Color> {
        Lut { samples: &self.samples, color: PhantomData }
    }

    /// Returns a gradient constructed from the samples, interpolating
    /// in the CIE L*C*h color space between consecutive samples.
    pub fn gradient<Color: RGBColor>(&self) -> ColorMapGradient<Color> {
        ColorMapGradient {
            gradients: self.samples.windows(2)
                .map(|c| Gradient::between(to_rgba(c[0]), to_rgba(c[1])))
                .collect() }
    }
}

/// Sample (components in \[0, 1\]) to opaque RGBA in \[0, 255\].
fn to_rgba(c: RGB<f64>) -> RGBA<f64> {
    RGBA { r: 255. * c.r, g: 255. * c.g, b: 255. * c.b, a: 255. }
}

/// Piecewise linear interpolation of a [`ColorMap`].
///
/// Created by [`ColorMap::lut`].
pub struct Lut<'a, Color> {
    samples: &'a [RGB<f64>],
    color: PhantomData<Color>,
}

impl<Color> ColorRange<Color> for Lut<'_, Color>
where Color: RGBColor {
    fn rgb(&self, t: f64) -> Color {
        let n = self.samples.len() - 1;
        let tn = t.clamp(0., 1.) * n as f64;
        let i = (tn.trunc() as usize).min(n - 1);
        let f = tn - i as f64;
        let c0 = self.samples[i];
        let c1 = self.samples[i + 1];
        let lerp = |x0: f64, x1: f64| 255. * (x0 + f * (x1 - x0));
        Color::from_rgba(RGBA { r: lerp(c0.r, c1.r), g: lerp(c0.g, c1.g),
                                b: lerp(c0.b, c1.b), a: 255. })
    }
}

/// A gradient based on a [`ColorMap`].
///
/// Created by [`ColorMap::gradient`].
pub struct ColorMapGradient<Color> {
    gradients: Vec<Gradient<Color>>,
}

impl<Color> ColorRange<Color> for ColorMapGradient<Color>
where Color: RGBColor {
    fn rgb(&self, t: f64) -> Color {
        let n = self.gradients.len();
        let tn = t.clamp(0., 1.) * n as f64;
        let i = tn.trunc() as usize;
        if i < n { self.gradients[i].rgb_unsafe(tn.fract()) }
        else { self.gradients[n-1].rgb_unsafe(1.) }
    }
}
