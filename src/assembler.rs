//! Multi-element assembly into a wide daily table.
//!
//! Collects monthly series grouped by element across a whole file, then
//! builds one date-indexed DataFrame: one concatenation per element, one
//! multi-way outer join on the date, year/month/day derivation, and an
//! ascending date sort so row order never depends on join internals.

use std::collections::HashMap;

use chrono::NaiveDate;
use polars::prelude::*;

use crate::element::Element;
use crate::error::{DlyError, Result};
use crate::models::DailySeries;

/// Insertion-ordered collection of monthly series grouped by element.
///
/// Element order is first-encountered order (file order), which fixes the
/// column order of the assembled table; within an element, series keep
/// their arrival order.
#[derive(Debug, Default)]
pub struct ElementGroups {
    order: Vec<Element>,
    groups: HashMap<Element, Vec<DailySeries>>,
}

impl ElementGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, series: DailySeries) {
        let entry = self.groups.entry(series.element).or_default();
        if entry.is_empty() {
            self.order.push(series.element);
        }
        entry.push(series);
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Elements in first-encountered order
    pub fn elements(&self) -> &[Element] {
        &self.order
    }
}

/// Outer-join all element series into one wide table.
///
/// Column order is `date`, `year`, `month`, `day`, then one Float64 column
/// per element in first-encountered order. Rows cover the union of all
/// element date coverage and are sorted ascending by date; dates an element
/// never observed hold null in its column. Zero usable elements is an
/// explicit [`DlyError::EmptyResult`], never a column-less table.
pub fn assemble(groups: ElementGroups) -> Result<DataFrame> {
    if groups.is_empty() {
        return Err(DlyError::EmptyResult);
    }

    let ElementGroups { order, mut groups } = groups;

    let mut frames = Vec::with_capacity(order.len());
    for element in &order {
        let series_list = groups.remove(element).unwrap_or_default();
        frames.push(element_frame(*element, &series_list)?);
    }

    let mut frames = frames.into_iter();
    let mut joined = frames
        .next()
        .ok_or(DlyError::EmptyResult)?
        .lazy();
    for frame in frames {
        joined = joined.join(
            frame.lazy(),
            [col("date")],
            [col("date")],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        );
    }

    let columns: Vec<Expr> = ["date", "year", "month", "day"]
        .into_iter()
        .map(col)
        .chain(order.iter().map(|element| col(element.column_name())))
        .collect();

    let assembled = joined
        .sort_by_exprs([col("date")], SortMultipleOptions::default())
        .with_columns([
            col("date").dt().year().cast(DataType::Int32).alias("year"),
            col("date").dt().month().cast(DataType::Int32).alias("month"),
            col("date").dt().day().cast(DataType::Int32).alias("day"),
        ])
        .select(columns)
        .collect()?;

    Ok(assembled)
}

/// Concatenate one element's series into a two-column (date, value) frame
fn element_frame(element: Element, series_list: &[DailySeries]) -> Result<DataFrame> {
    let total: usize = series_list.iter().map(DailySeries::len).sum();
    let mut days = Vec::with_capacity(total);
    let mut values = Vec::with_capacity(total);
    for series in series_list {
        days.extend(series.dates.iter().map(|date| date_to_days(*date)));
        values.extend(series.values.iter().copied());
    }

    let date = Column::new("date".into(), days).cast(&DataType::Date)?;
    let data = Column::new(element.column_name().into(), values);
    Ok(DataFrame::new(vec![date, data])?)
}

/// Days since the Unix epoch, the physical representation of a Date column
fn date_to_days(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}
