use crate::core::mapper::{parse_date, parse_price, DEFAULT_PROJECT_TYPE, DEFAULT_REGION};
use crate::domain::model::{Criteria, Statistics};
use crate::domain::row::Row;

impl Criteria {
    pub fn matches(&self, row: &Row) -> bool {
        if let Some(project_type) = &self.project_type {
            if row.project_type().to_string() != *project_type {
                return false;
            }
        }

        if let Some(region) = &self.region {
            if row.region().to_string() != *region {
                return false;
            }
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            match parse_date(row.date()) {
                Some(date) if date >= start && date <= end => {}
                _ => return false,
            }
        }

        true
    }
}

/// Data rows satisfying every present criterion, in stored order.
pub fn filter_rows<'a>(rows: &'a [Row], criteria: &Criteria) -> Vec<&'a Row> {
    rows.iter().filter(|row| criteria.matches(row)).collect()
}

/// Totals over data rows (header excluded).
pub fn compute_statistics<'a, I>(rows: I) -> Statistics
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut stats = Statistics::default();

    for row in rows {
        stats.total_orders += 1;
        stats.total_revenue += parse_price(row.price());

        let project_type = row
            .project_type()
            .as_text()
            .unwrap_or_else(|| DEFAULT_PROJECT_TYPE.to_string());
        *stats.project_type_counts.entry(project_type).or_insert(0) += 1;

        let region = row
            .region()
            .as_text()
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        *stats.region_counts.entry(region).or_insert(0) += 1;
    }

    if stats.total_orders > 0 {
        stats.avg_price = stats.total_revenue / stats.total_orders as f64;
    }

    stats
}
