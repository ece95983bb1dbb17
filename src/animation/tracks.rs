use crate::animation::values::Interpolatable;

/// The transform channel a track animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Position,
    Rotation,
    Scale,
}

impl TrackKind {
    /// Number of `f32` components per sample.
    #[inline]
    #[must_use]
    pub const fn dim(self) -> usize {
        match self {
            TrackKind::Position | TrackKind::Scale => 3,
            TrackKind::Rotation => 4,
        }
    }
}

/// The pair of samples a query time falls between.
///
/// Indices refer into the track the bracket was computed from. When the query
/// hits a sample exactly, or lies outside the sampled range, `prev == next`
/// and no interpolation takes place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeBracket {
    pub prev: usize,
    pub next: usize,
    pub fraction: f32,
}

impl KeyframeBracket {
    #[inline]
    #[must_use]
    pub const fn exact(index: usize) -> Self {
        Self {
            prev: index,
            next: index,
            fraction: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.prev == self.next
    }
}

/// Time-stamped samples for one transform channel of one bone.
///
/// Values are stored flat: sample `i` occupies
/// `values[i * dim .. (i + 1) * dim]`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack {
    kind: TrackKind,
    pub(crate) times: Vec<f64>,
    pub(crate) values: Vec<f32>,
}

impl KeyframeTrack {
    /// Allocates `count` zeroed samples of the given kind.
    #[must_use]
    pub fn init(kind: TrackKind, count: usize) -> Self {
        Self {
            kind,
            times: vec![0.0; count],
            values: vec![0.0; count * kind.dim()],
        }
    }

    #[must_use]
    pub fn empty(kind: TrackKind) -> Self {
        Self::init(kind, 0)
    }

    /// Builds a track from parallel time/value arrays.
    ///
    /// Returns `None` when `values.len() != times.len() * kind.dim()`.
    #[must_use]
    pub fn from_samples(kind: TrackKind, times: Vec<f64>, values: Vec<f32>) -> Option<Self> {
        (values.len() == times.len() * kind.dim()).then_some(Self {
            kind,
            times,
            values,
        })
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn time(&self, index: usize) -> f64 {
        self.times[index]
    }

    /// Components of sample `index`.
    #[inline]
    #[must_use]
    pub fn value(&self, index: usize) -> &[f32] {
        let dim = self.kind.dim();
        &self.values[index * dim..(index + 1) * dim]
    }

    /// Overwrites sample `index` with the first `dim` floats of `components`.
    ///
    /// Returns `false` and leaves the track untouched when `index` is out of
    /// range or `components` is too short.
    pub fn set(&mut self, index: usize, time: f64, components: &[f32]) -> bool {
        let dim = self.kind.dim();
        let (Some(slot), Some(src)) = (self.times.get_mut(index), components.get(..dim)) else {
            return false;
        };
        *slot = time;
        self.values[index * dim..(index + 1) * dim].copy_from_slice(src);
        true
    }

    /// Whether sample times never decrease.
    #[must_use]
    pub fn is_time_ordered(&self) -> bool {
        self.times.windows(2).all(|w| w[0] <= w[1])
    }

    /// Locates the samples surrounding `time`.
    ///
    /// Scans in ascending time order: an exact time match is used as-is,
    /// otherwise the first later sample and its predecessor form the bracket.
    /// Times before the first sample or after the last clamp to that edge
    /// sample. Returns `None` only for an empty track.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn bracket(&self, time: f64) -> Option<KeyframeBracket> {
        let last = self.times.len().checked_sub(1)?;

        for (index, &t) in self.times.iter().enumerate() {
            if t == time {
                return Some(KeyframeBracket::exact(index));
            }
            if t > time {
                if index == 0 {
                    return Some(KeyframeBracket::exact(0));
                }
                let prev = index - 1;
                let t0 = self.times[prev];
                let span = t - t0;
                let fraction = if span > 0.0 {
                    ((time - t0) / span) as f32
                } else {
                    0.0
                };
                return Some(KeyframeBracket {
                    prev,
                    next: index,
                    fraction,
                });
            }
        }

        Some(KeyframeBracket::exact(last))
    }

    /// Samples the track at `time`.
    ///
    /// With `interpolate` off the bracket's earlier sample is returned as-is.
    /// `T::DIM` must match the track's kind.
    #[must_use]
    pub fn sample<T: Interpolatable>(&self, time: f64, interpolate: bool) -> Option<T> {
        debug_assert_eq!(T::DIM, self.kind.dim());

        let bracket = self.bracket(time)?;
        let v0 = T::from_components(self.value(bracket.prev));

        if bracket.is_exact() || !interpolate {
            return Some(v0);
        }

        let v1 = T::from_components(self.value(bracket.next));
        Some(T::interpolate_linear(v0, v1, bracket.fraction))
    }
}
