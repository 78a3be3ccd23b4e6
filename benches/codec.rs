use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use vcfcodec::{parse_vcf, write_vcf, SupplementarySchema, WriterConfig};

const HEADER: &str = "##fileformat=VCFv4.2
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele Frequency\">
##INFO=<ID=DB,Number=0,Type=Flag,Description=\"dbSNP membership\">
##INFO=<ID=CSQ,Number=.,Type=String,Description=\"Consequence annotations from Ensembl VEP. Format: Allele|Consequence|IMPACT|SYMBOL|PHENO\">
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
##FORMAT=<ID=GQ,Number=1,Type=Integer,Description=\"Genotype Quality\">
##FORMAT=<ID=AD,Number=R,Type=Integer,Description=\"Allelic depths\">
";

const SUPPLEMENT: &str = r#"{"info":{"CSQ":{"nestedFields":{"Consequence":{"type":"STRING","numberType":"OTHER"},"PHENO":{"type":"INTEGER","numberType":"OTHER"}}}}}"#;

/// Build a document with `num_records` records and `num_samples` samples
fn create_test_vcf(num_records: usize, num_samples: usize) -> String {
    let mut text = String::from(HEADER);
    text.push_str("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT");
    for s in 0..num_samples {
        text.push_str(&format!("\tS{}", s));
    }
    text.push('\n');

    for i in 0..num_records {
        text.push_str(&format!(
            "1\t{}\trs{}\tA\tG\t{}\tPASS\tDP={};AF=0.{};DB;CSQ=G|missense_variant&splice_region_variant|MODERATE|GENE{}|1&0,G|intron_variant|MODIFIER||\tGT:GQ:AD",
            i * 100 + 1,
            i,
            i % 60,
            i % 500,
            i % 10,
            i % 50
        ));
        for s in 0..num_samples {
            let gt = if (i + s) % 3 == 0 { "0/1" } else { "0|0" };
            text.push_str(&format!("\t{}:{}:{},{}", gt, (i + s) % 99, s, i % 40));
        }
        text.push('\n');
    }
    text
}

/// Benchmark decoding whole documents
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_vcf");
    let supplement = Arc::new(SupplementarySchema::from_json(SUPPLEMENT).unwrap());

    for num_records in [100, 1000, 10000] {
        let text = create_test_vcf(num_records, 4);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}records", num_records)),
            &text,
            |b, text| {
                b.iter(|| {
                    let document = parse_vcf(black_box(text), Some(supplement.clone())).unwrap();
                    black_box(document);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark parallel decoding against the sequential path
#[cfg(feature = "parallel")]
fn bench_parse_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_vcf_parallel");

    for num_records in [1000, 10000] {
        let text = create_test_vcf(num_records, 16);
        group.throughput(Throughput::Elements(num_records as u64));

        group.bench_with_input(
            BenchmarkId::new("sequential", num_records),
            &text,
            |b, text| b.iter(|| black_box(parse_vcf(black_box(text), None).unwrap())),
        );
        group.bench_with_input(
            BenchmarkId::new("parallel", num_records),
            &text,
            |b, text| b.iter(|| black_box(vcfcodec::parse_vcf_parallel(black_box(text), None).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark encoding with and without sample filtering
fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_vcf");
    let document = parse_vcf(&create_test_vcf(1000, 8), None).unwrap();

    let configs = [
        ("all_samples", WriterConfig::default()),
        ("two_samples", WriterConfig::with_samples(["S0", "S5"])),
        ("no_samples", WriterConfig::without_samples()),
    ];

    group.throughput(Throughput::Elements(document.records.len() as u64));
    for (name, config) in &configs {
        group.bench_with_input(BenchmarkId::from_parameter(name), config, |b, config| {
            b.iter(|| {
                let text = write_vcf(black_box(&document), config).unwrap();
                black_box(text);
            });
        });
    }

    group.finish();
}

#[cfg(feature = "parallel")]
criterion_group!(benches, bench_parse, bench_parse_parallel, bench_write);
#[cfg(not(feature = "parallel"))]
criterion_group!(benches, bench_parse, bench_write);
criterion_main!(benches);
