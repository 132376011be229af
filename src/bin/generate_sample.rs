use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use isotope_dashboard::data::loader::{COUNTRY_COLUMN, ISOTOPES_COLUMN, PRODUCTION_COLUMN};
use isotope_dashboard::data::ReferenceTables;
use parquet::arrow::ArrowWriter;

const ISOTOPES: &[&str] = &[
    "Mo-99", "Tc-99m", "I-131", "Ir-192", "Co-60", "F-18", "C-11", "Lu-177", "Y-90",
];

/// Producers with no reference entry, to exercise the (0, 0) fallback.
const UNPLACED: &[&str] = &["Russia", "Canada"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            // splitmix64
            x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            *slot = z ^ (z >> 31);
        }
        Self { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = self.state[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// One synthetic row: roughly one in eight producers is "NR" and one in ten
/// lists no isotopes.
fn generate_row(country: &str, rng: &mut SimpleRng) -> [String; 3] {
    let production = if rng.next_f64() < 0.125 {
        "NR".to_string()
    } else {
        // Log-uniform between 10 and 10 000 TBq.
        format!("{:.0}", 10f64.powf(1.0 + 3.0 * rng.next_f64()))
    };

    let isotopes = if rng.next_f64() < 0.1 {
        String::new()
    } else {
        let n = 1 + rng.below(3);
        let mut picked: Vec<&str> = Vec::new();
        while picked.len() < n {
            let iso = ISOTOPES[rng.below(ISOTOPES.len())];
            if !picked.contains(&iso) {
                picked.push(iso);
            }
        }
        picked.join(", ")
    };

    [country.to_string(), isotopes, production]
}

fn main() {
    let mut rng = SimpleRng::new(2002);

    let tables = ReferenceTables::builtin();
    let mut countries: Vec<&str> = tables.countries().collect();
    countries.extend_from_slice(UNPLACED);
    let rows: Vec<[String; 3]> = countries
        .iter()
        .map(|country| generate_row(country, &mut rng))
        .collect();

    // Write CSV
    let csv_path = "sample_isotopes.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record([COUNTRY_COLUMN, ISOTOPES_COLUMN, PRODUCTION_COLUMN])
        .expect("Failed to write CSV header");
    for row in &rows {
        writer.write_record(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // Build Arrow arrays; blank isotope cells become nulls.
    let column = |i: usize| {
        StringArray::from(
            rows.iter()
                .map(|r| if r[i].is_empty() { None } else { Some(r[i].as_str()) })
                .collect::<Vec<_>>(),
        )
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new(COUNTRY_COLUMN, DataType::Utf8, false),
        Field::new(ISOTOPES_COLUMN, DataType::Utf8, true),
        Field::new(PRODUCTION_COLUMN, DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(column(0)),
        Arc::new(column(1)),
        Arc::new(column(2)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_isotopes.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} producers to {csv_path} and {parquet_path}",
        rows.len()
    );
}
