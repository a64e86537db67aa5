//! Scales
//!
//! Domain-to-pixel mappings for the two charts:
//!
//! - [`BandScale`]: categorical x positions for bars
//! - [`LinearScale`]: value axis with "nice" ticks
//! - [`TimeScale`]: month positions for the line chart
//!
//! A scale over a zero-width domain maps every value to the middle of its
//! range.

use crate::aggregate::Month;

/// Evenly spaced bands for a categorical domain.
///
/// `padding` is applied between bands and on both outer edges as a fraction
/// of the step; leftover space is split evenly on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let padding = padding.clamp(0.0, 1.0);
        let (lo, hi) = if range.1 < range.0 {
            (range.1, range.0)
        } else {
            range
        };

        let n = domain.len() as f64;
        let step = (hi - lo) / (n - padding + padding * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - padding)) * 0.5;

        Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of the band for `key`
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Center of the band for `key`
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Continuous linear mapping from a value domain to pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        r0 + t * (r1 - r0)
    }

    /// Step between roughly `count` ticks, a power of ten times 1, 2 or 5
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.0, self.domain.1, count)
    }

    /// Round-valued ticks covering the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.1 < self.domain.0 {
            (self.domain.1, self.domain.0)
        } else {
            self.domain
        };

        if !lo.is_finite() || !hi.is_finite() || count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let step = tick_step(lo, hi, count);
        if step >= 1.0 {
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        } else {
            // Divide by the inverse to keep ticks like 0.6 exact
            let inverse = (1.0 / step).round();
            let first = (lo * inverse).ceil() as i64;
            let last = (hi * inverse).floor() as i64;
            (first..=last).map(|i| i as f64 / inverse).collect()
        }
    }
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw == 0.0 || !raw.is_finite() {
        return 1.0;
    }

    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;

    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    factor * base
}

/// Linear mapping of months onto pixels, measured in days
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (Month, Month),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (Month, Month), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale spanning the earliest and latest of `months`
    pub fn spanning<I>(months: I, range: (f64, f64)) -> Option<Self>
    where
        I: IntoIterator<Item = Month>,
    {
        let mut iter = months.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
        Some(Self::new((min, max), range))
    }

    pub fn domain(&self) -> (Month, Month) {
        self.domain
    }

    pub fn map(&self, month: Month) -> f64 {
        let d0 = f64::from(self.domain.0.days_from_ce());
        let d1 = f64::from(self.domain.1.days_from_ce());
        LinearScale::new((d0, d1), self.range).map(f64::from(month.days_from_ce()))
    }

    /// Every month from the start to the end of the domain
    pub fn month_ticks(&self) -> Vec<Month> {
        let mut ticks = Vec::new();
        let mut current = Some(self.domain.0);
        while let Some(month) = current {
            if month > self.domain.1 {
                break;
            }
            ticks.push(month);
            current = month.succ();
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_band_scale_layout() {
        // n = 4, padding 0.2: step = 400 / 4.2
        let scale = BandScale::new(keys(&["A", "B", "C", "D"]), (0.0, 400.0), 0.2);
        let step = 400.0 / 4.2;

        assert!(approx(scale.step(), step));
        assert!(approx(scale.bandwidth(), step * 0.8));
        assert!(approx(scale.position("A").unwrap(), step * 0.2));
        assert!(approx(scale.position("D").unwrap(), step * 3.2));
        // Last band ends one outer padding before the range end
        assert!(approx(scale.position("D").unwrap() + scale.bandwidth(), 400.0 - step * 0.2));
        assert!(scale.position("Z").is_none());
    }

    #[test]
    fn test_band_scale_empty_domain() {
        let scale = BandScale::new(Vec::new(), (0.0, 100.0), 0.2);
        assert!(scale.domain().is_empty());
        assert!(scale.position("A").is_none());
    }

    #[test]
    fn test_linear_map_inverted_range() {
        let y = LinearScale::new((0.0, 10.0), (350.0, 0.0));
        assert_eq!(y.map(0.0), 350.0);
        assert_eq!(y.map(10.0), 0.0);
        assert_eq!(y.map(5.0), 175.0);
    }

    #[test]
    fn test_linear_degenerate_domain() {
        let y = LinearScale::new((0.0, 0.0), (350.0, 0.0));
        assert_eq!(y.map(0.0), 175.0);
        assert_eq!(y.ticks(10), vec![0.0]);
    }

    #[test]
    fn test_ticks() {
        let y = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(y.ticks(10), (0..=10).map(f64::from).collect::<Vec<_>>());

        let y = LinearScale::new((0.0, 37.0), (100.0, 0.0));
        assert_eq!(y.tick_step(10), 5.0);
        assert_eq!(y.ticks(10), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0]);

        let y = LinearScale::new((0.0, 1.0), (100.0, 0.0));
        let ticks = y.ticks(5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_time_scale() {
        let jan = Month::new(2020, 1).unwrap();
        let mar = Month::new(2020, 3).unwrap();
        let scale = TimeScale::spanning([mar, jan], (0.0, 600.0)).unwrap();

        assert_eq!(scale.domain(), (jan, mar));
        assert_eq!(scale.map(jan), 0.0);
        assert_eq!(scale.map(mar), 600.0);
        // February starts 31 of the 60 days in
        assert!(approx(scale.map(Month::new(2020, 2).unwrap()), 600.0 * 31.0 / 60.0));
        assert_eq!(scale.month_ticks().len(), 3);
    }

    #[test]
    fn test_time_scale_single_month() {
        let jan = Month::new(2020, 1).unwrap();
        let scale = TimeScale::spanning([jan], (0.0, 600.0)).unwrap();
        assert_eq!(scale.map(jan), 300.0);
        assert_eq!(scale.month_ticks(), vec![jan]);
        assert!(TimeScale::spanning(Vec::new(), (0.0, 1.0)).is_none());
    }
}
