use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::{Format, Workbook};
use station_cleaner::config::CleanerConfig;
use station_cleaner::processors::BatchCleaner;
use station_cleaner::readers::open_source;
use station_cleaner::utils::datetime_to_excel_serial;
use station_cleaner::writers::create_sink;
use station_cleaner::CleaningError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn hour(h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

enum Cell<'a> {
    Num(f64),
    Text(&'a str),
    Date(NaiveDateTime),
    Blank,
}

fn write_input_workbook(path: &Path, sheets: &[(&str, Vec<&str>, Vec<Vec<Cell>>)]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (name, headers, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            let r = r as u32 + 1;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell {
                    Cell::Num(v) => {
                        worksheet.write_number(r, c, *v).unwrap();
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, *s).unwrap();
                    }
                    Cell::Date(dt) => {
                        worksheet
                            .write_number_with_format(r, c, datetime_to_excel_serial(dt), &date_format)
                            .unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

fn station_rows(outlier: f64) -> Vec<Vec<Cell<'static>>> {
    use Cell::*;
    vec![
        vec![Text("units"), Text("ppm"), Text("%"), Text("ppb")],
        vec![Date(hour(0)), Num(1.0), Num(40.0), Blank],
        vec![Date(hour(1)), Text("NULL"), Num(42.0), Blank],
        vec![Date(hour(2)), Num(3.0), Text("NULL"), Blank],
        vec![Date(hour(3)), Num(outlier), Num(46.0), Blank],
        vec![Date(hour(4)), Num(5.0), Num(48.0), Blank],
    ]
}

fn numeric_column(range: &calamine::Range<Data>, col: usize) -> Vec<f64> {
    range
        .rows()
        .skip(1)
        .map(|row| match &row[col] {
            Data::Float(f) => *f,
            Data::Int(i) => *i as f64,
            other => panic!("expected number, got {:?}", other),
        })
        .collect()
}

fn config_for(stations: &[&str]) -> CleanerConfig {
    CleanerConfig {
        stations: stations.iter().map(|s| s.to_string()).collect(),
        ..CleanerConfig::default()
    }
}

#[test]
fn test_workbook_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let input = dir.path().join("historical.xlsx");
    let output = dir.path().join("clean").join("historical_clean.xlsx");

    let headers = vec!["date", "CO", "RH", "SO2"];
    write_input_workbook(
        &input,
        &[
            ("SE", headers.clone(), station_rows(999.0)),
            ("CE", headers.clone(), station_rows(4.0)),
            ("IGNORED", headers, station_rows(4.0)),
        ],
    );

    let mut source = open_source(&input).unwrap();
    let mut sink = create_sink(&output);
    let report = BatchCleaner::new(config_for(&["SE", "CE"]))
        .run(source.as_mut(), Some(sink.as_mut()), None)
        .unwrap();

    assert_eq!(report.stations.len(), 2);
    let se = report.station("SE").unwrap();
    assert_eq!(se.data_rows, 5);
    assert_eq!(se.rows_kept, 5);
    assert_eq!(se.empty_columns, vec!["SO2".to_string()]);
    assert_eq!(se.outliers_replaced.get("CO"), Some(&1));

    let mut cleaned = open_workbook_auto(&output).unwrap();
    assert_eq!(cleaned.sheet_names(), vec!["SE".to_string(), "CE".to_string()]);

    let range = cleaned.worksheet_range("SE").unwrap();
    let header: Vec<String> = range.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
    assert_eq!(header, vec!["date", "CO", "RH"]);
    assert_eq!(range.height(), 6);

    // CO: [1, NULL, 3, 999, 5] -> interpolate 2 -> median of [1,2,3,999,5] is 3
    assert_eq!(numeric_column(&range, 1), vec![1.0, 2.0, 3.0, 3.0, 5.0]);
    assert_eq!(numeric_column(&range, 2), vec![40.0, 42.0, 44.0, 46.0, 48.0]);

    let timestamps: Vec<NaiveDateTime> = range
        .rows()
        .skip(1)
        .map(|row| match &row[0] {
            Data::DateTime(dt) => dt.as_datetime().unwrap(),
            other => panic!("expected date-time, got {:?}", other),
        })
        .collect();
    for (i, ts) in timestamps.iter().enumerate() {
        let expected = hour(i as u32);
        assert!((*ts - expected).num_seconds().abs() <= 1, "{} != {}", ts, expected);
    }

    let ce = cleaned.worksheet_range("CE").unwrap();
    assert_eq!(numeric_column(&ce, 1), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_missing_station_is_fatal() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let input = dir.path().join("historical.xlsx");
    let output = dir.path().join("out.xlsx");
    write_input_workbook(&input, &[("SE", vec!["date", "CO"], station_rows(1.0))]);

    let mut source = open_source(&input).unwrap();
    let mut sink = create_sink(&output);
    let result =
        BatchCleaner::new(config_for(&["SE", "NTE2"])).run(source.as_mut(), Some(sink.as_mut()), None);

    match result {
        Err(CleaningError::SourceUnavailable { station, .. }) => assert_eq!(station, "NTE2"),
        other => panic!("expected SourceUnavailable, got {:?}", other.map(|r| r.stations.len())),
    }
    assert!(!output.exists());
}

#[test]
fn test_csv_directory_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let input = dir.path().join("stations");
    let output = dir.path().join("cleaned");
    fs::create_dir_all(&input).unwrap();

    fs::write(
        input.join("NE.csv"),
        "date,PM10,WDR,NOTES\n\
         units,ug/m3,deg,\n\
         2023-01-01 00:00,10,90,\n\
         2023-01-01 01:00,NULL,NULL,\n\
         2023-01-01 02:00,30,400,\n\
         bad date,40,100,\n",
    )
    .unwrap();
    fs::write(
        input.join("SUR.csv"),
        "date,BP\nunits,hPa\n2023-01-01 00:00,900\n2023-01-01 01:00,5\n2023-01-01 02:00,1000\n",
    )
    .unwrap();

    let mut source = open_source(&input).unwrap();
    let mut sink = create_sink(&output);
    let report = BatchCleaner::new(CleanerConfig::default())
        .with_all_sheets(true)
        .run(source.as_mut(), Some(sink.as_mut()), None)
        .unwrap();

    assert_eq!(report.stations.len(), 2);
    let ne = report.station("NE").unwrap();
    assert_eq!(ne.rows_kept, 3);
    assert_eq!(ne.timestamp_parse_failures, 1);
    assert_eq!(ne.empty_columns, vec!["NOTES".to_string()]);

    // Row 01:00 has no valid value and is dropped; WDR 400 is out of range
    let written = fs::read_to_string(output.join("NE.csv")).unwrap();
    assert_eq!(
        written,
        "date,PM10,WDR\n\
         2023-01-01 00:00:00,10,90\n\
         2023-01-01 02:00:00,30,100\n\
         ,40,100\n"
    );

    let written = fs::read_to_string(output.join("SUR.csv")).unwrap();
    assert_eq!(
        written,
        "date,BP\n\
         2023-01-01 00:00:00,900\n\
         2023-01-01 01:00:00,900\n\
         2023-01-01 02:00:00,1000\n"
    );
}
