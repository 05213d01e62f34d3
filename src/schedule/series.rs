//! Year-indexed currency series

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Ordered amounts keyed by project year `0..=project_life`
///
/// Year 0 is the transaction date, years 1..N are period ends. Every series
/// built for one scenario has exactly `project_life + 1` entries, and all
/// element-wise combinators assert that both sides share that length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearSeries {
    values: Vec<f64>,
}

impl YearSeries {
    /// All-zero series covering years `0..=project_life`
    pub fn zeros(project_life: u32) -> Self {
        Self {
            values: vec![0.0; project_life as usize + 1],
        }
    }

    /// Build a series by evaluating `f` for each year
    pub fn from_fn<F>(project_life: u32, f: F) -> Self
    where
        F: FnMut(u32) -> f64,
    {
        Self {
            values: (0..=project_life).map(f).collect(),
        }
    }

    /// Wrap raw values; year 0 is the first element
    ///
    /// # Panics
    /// If `values` is empty, since a series always carries year 0.
    pub fn from_values(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "a year series always includes year 0");
        Self { values }
    }

    /// Last year index in the series
    pub fn project_life(&self) -> u32 {
        (self.values.len() - 1) as u32
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Amount at `year`, or zero past the horizon
    pub fn get(&self, year: u32) -> f64 {
        self.values.get(year as usize).copied().unwrap_or(0.0)
    }

    /// Overwrite the amount at `year`
    ///
    /// # Panics
    /// If `year` lies beyond the horizon.
    pub fn set(&mut self, year: u32, amount: f64) {
        self.values[year as usize] = amount;
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(year, amount)` pairs in year order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(year, &amount)| (year as u32, amount))
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Multiply every year by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|amount| amount * factor)
    }

    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        Self {
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two series year by year
    ///
    /// # Panics
    /// If the series cover different horizons.
    pub fn zip_with<F>(&self, other: &YearSeries, mut f: F) -> Self
    where
        F: FnMut(f64, f64) -> f64,
    {
        self.assert_same_horizon(other);
        Self {
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    pub fn add(&self, other: &YearSeries) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn sub(&self, other: &YearSeries) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Sum of year-by-year products, e.g. cash flows weighted by discount factors
    pub fn dot(&self, other: &YearSeries) -> f64 {
        self.assert_same_horizon(other);
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Running total through each year
    pub fn cumulative(&self) -> Self {
        let mut running = 0.0;
        self.map(|amount| {
            running += amount;
            running
        })
    }

    fn assert_same_horizon(&self, other: &YearSeries) {
        assert_eq!(
            self.values.len(),
            other.values.len(),
            "year series cover different horizons"
        );
    }
}

impl Index<u32> for YearSeries {
    type Output = f64;

    fn index(&self, year: u32) -> &f64 {
        &self.values[year as usize]
    }
}
