//! Services for the fetch-normalize-aggregate pipeline

pub mod aggregator;
pub mod fetcher;
pub mod formatter;
pub mod normalizer;

pub use aggregator::Aggregator;
pub use fetcher::Fetcher;

#[cfg(test)]
mod tests {
    //! Cross-service pipeline tests (normalize -> aggregate -> render)

    use super::*;
    use crate::types::InvsumError;

    fn run_pipeline(payload: &str) -> crate::types::Result<(Vec<String>, usize)> {
        let batch = normalizer::normalize(payload)?;
        let groups = Aggregator::by_supplier_month(batch.records);
        Ok((formatter::render(&groups), batch.rejected))
    }

    #[test]
    fn test_end_to_end_example() {
        let payload = "supplier_id,invoice_date,gross_amount\n\
                       SUP001,01-15-24,100.00\n\
                       SUP001,01-20-24,50.005\n\
                       SUP002,12-31-23,200.10\n";
        let (lines, rejected) = run_pipeline(payload).unwrap();
        assert_eq!(lines, vec!["SUP001,2024-01,150.01", "SUP002,2023-12,200.10"]);
        assert_eq!(rejected, 0);
    }

    #[test]
    fn test_output_is_deterministic_across_runs() {
        let payload = "supplier_id,invoice_date,gross_amount\n\
                       SUP003,03-01-24,1.11\n\
                       SUP001,01-15-24,2.22\n\
                       SUP002,02-20-24,3.33\n\
                       SUP001,02-28-24,4.44\n";
        let first = run_pipeline(payload).unwrap();
        let second = run_pipeline(payload).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_partial_failure_tolerated() {
        let payload = "supplier_id,invoice_date,gross_amount\n\
                       SUP001,01-15-24,100.00\n\
                       SUP001,garbage,50.00\n\
                       SUP002,12-31-23,200.10\n";
        let (lines, rejected) = run_pipeline(payload).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(rejected, 1);
    }

    #[test]
    fn test_all_rows_bad_escalates() {
        let payload = "supplier_id,invoice_date,gross_amount\n\
                       SUP001,garbage,50.00\n\
                       SUP002,junk,1.00\n\
                       SUP003,01-15-24,not-money\n";
        let err = run_pipeline(payload).unwrap_err();
        assert!(matches!(err, InvsumError::AllRowsRejected(3)));
    }

    #[test]
    fn test_every_line_matches_output_contract() {
        let payload = "supplier_id,invoice_date,gross_amount\n\
                       SUP001,01-15-24,100.005\n\
                       SUP002,06-30-24,-7.5\n";
        let (lines, _) = run_pipeline(payload).unwrap();
        for line in &lines {
            // ^[^,]+,\d{4}-\d{2},-?\d+\.\d{2}$
            let parts: Vec<&str> = line.split(',').collect();
            assert_eq!(parts.len(), 3, "bad line: {line}");
            assert_eq!(parts[1].len(), 7);
            assert_eq!(&parts[1][4..5], "-");
            let amount = parts[2].strip_prefix('-').unwrap_or(parts[2]);
            let (int, frac) = amount.split_once('.').expect("amount has a decimal point");
            assert!(!int.is_empty() && int.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(frac.len(), 2);
        }
    }
}
