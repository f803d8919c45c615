//! Shared test fixtures.
//!
//! The cashflow fixture is a small rolling rent collection sheet: 14 monthly
//! columns (JAN 17 through FEB 18) across the top row, 8 titled rows down the
//! first column, and the data body below/right of that corner. The same
//! matrix is also available transposed (dates down the first column) so axis
//! inference can be exercised in both orientations.

use std::io::Write;

use tempfile::NamedTempFile;

/// Write raw CSV text to a temp file that lives as long as the returned guard.
pub(crate) fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(content.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}

/// The cashflow sheet as a matrix, dates across columns.
fn cashflow_matrix() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "Cash Collections",
            "JAN 17",
            "FEB 17",
            "MAR 17",
            "APR 17",
            "MAY 17",
            "JUN 17",
            "JUL 17",
            "AUG 17",
            "SEP 17",
            "OCT 17",
            "NOV 17",
            "DEC 17",
            "JAN 18",
            "FEB 18",
        ],
        vec![
            "Scheduled Rent",
            "$4,500.00",
            "$4,500.00",
            "$4,600.00",
            "$4,600.00",
            "$4,650.00",
            "$4,700.00",
            "$4,700.00",
            "$4,750.00",
            "$4,800.00",
            "$4,800.00",
            "$4,800.00",
            "$4,850.00",
            "$4,900.00",
            "$4,900.00",
        ],
        vec![
            "Vacancy Loss",
            "-450",
            "0",
            "-230",
            "0",
            "0",
            "-470",
            "0",
            "0",
            "-350",
            "0",
            "-221",
            "0",
            "0",
            "-245",
        ],
        vec![
            "Collected Rent",
            "4050",
            "4500",
            "4370",
            "4600",
            "4650",
            "4230",
            "4700",
            "4750",
            "4450",
            "4800",
            "4579",
            "4850",
            "4900",
            "4655",
        ],
        vec![
            "Discount/Promotion",
            "-100",
            "-100",
            "-125",
            "-125",
            "-125",
            "-125",
            "-150",
            "-150",
            "-150",
            "-150",
            "-121",
            "-150",
            "-175",
            "-175",
        ],
        vec![
            "Utilities Reimbursement",
            "210",
            "215",
            "225",
            "220",
            "230",
            "240",
            "235",
            "225",
            "230",
            "240",
            "250",
            "245",
            "255",
            "260",
        ],
        vec![
            "Total Collections",
            "4160",
            "4690",
            "4410",
            "4777.5",
            "4755",
            "4270",
            "4935",
            "4825",
            "4520",
            "4890",
            "4733",
            "4945",
            "4900",
            "4900",
        ],
        vec![
            "Late Fees",
            "0",
            "75",
            "0",
            "82.5",
            "0",
            "0",
            "150",
            "0",
            "82.5",
            "0",
            "75",
            "0",
            "0",
            "160",
        ],
        vec![
            "Bad Debt",
            "0",
            "0",
            "-60",
            "0",
            "0",
            "-75",
            "0",
            "0",
            "-92.5",
            "0",
            "-50",
            "0",
            "-80",
            "0",
        ],
    ]
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn matrix_to_csv(matrix: &[Vec<&str>]) -> String {
    matrix
        .iter()
        .map(|row| row.iter().map(|f| quote_field(f)).collect::<Vec<_>>().join(","))
        .map(|line| line + "\n")
        .collect()
}

fn transpose<'a>(matrix: &[Vec<&'a str>]) -> Vec<Vec<&'a str>> {
    let width = matrix.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|j| matrix.iter().filter_map(|row| row.get(j).copied()).collect())
        .collect()
}

/// Cashflow sheet with dates across columns and titles down rows.
pub(crate) fn cashflow_fixture() -> NamedTempFile {
    write_csv(&matrix_to_csv(&cashflow_matrix()))
}

/// The same sheet transposed: dates down rows, titles across columns.
pub(crate) fn transposed_cashflow_fixture() -> NamedTempFile {
    write_csv(&matrix_to_csv(&transpose(&cashflow_matrix())))
}

/// The date labels of the cashflow fixture, in axis order.
pub(crate) const CASHFLOW_DATES: [&str; 14] = [
    "JAN 17", "FEB 17", "MAR 17", "APR 17", "MAY 17", "JUN 17", "JUL 17", "AUG 17", "SEP 17",
    "OCT 17", "NOV 17", "DEC 17", "JAN 18", "FEB 18",
];

/// The row titles of the cashflow fixture, in axis order.
pub(crate) const CASHFLOW_TITLES: [&str; 8] = [
    "Scheduled Rent",
    "Vacancy Loss",
    "Collected Rent",
    "Discount/Promotion",
    "Utilities Reimbursement",
    "Total Collections",
    "Late Fees",
    "Bad Debt",
];
