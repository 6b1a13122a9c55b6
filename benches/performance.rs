use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pbix_lineage::core::record::LineageRecord;
use pbix_lineage::core::Report;
use pbix_lineage::parsers::{extract_sql_objects, parse_section_document, MExpressionAnalyzer};
use std::path::Path;

fn sample_section(queries: usize) -> String {
    let mut document = String::from("section Section1;\r\n");
    for i in 0..queries {
        document.push_str(&format!(
            r#"
shared Query{i} = let
    Source = Sql.Database("srv{server}", "warehouse"),
    Raw = Value.NativeQuery(Source, "SELECT f.*, d.Name
        FROM fact.Sales{i} f
        JOIN dim.Store d ON d.Id = f.StoreId
        LEFT JOIN dim.Date dt ON dt.Id = f.DateId", null, [EnableFolding=true]),
    Nav = Source{{[Schema="dbo",Item="vw_Targets{i}"]}}[Data]
in
    Table.Combine({{Raw, Nav}});
"#,
            server = i % 4
        ));
    }
    document
}

fn benchmark_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("lineage_analysis");

    let document = sample_section(200);
    let analyzer = MExpressionAnalyzer::new();
    let container = Path::new("bench.pbix");

    group.bench_function("section_split", |b| {
        b.iter(|| parse_section_document(black_box(&document)))
    });

    let rows = parse_section_document(&document);
    group.bench_function("expression_analysis", |b| {
        b.iter(|| {
            rows.iter()
                .flat_map(|row| {
                    analyzer.analyze(container, row.table_name.as_deref(), black_box(&row.expression))
                })
                .count()
        })
    });

    group.bench_function("sql_objects", |b| {
        b.iter(|| {
            extract_sql_objects(black_box(
                "SELECT * FROM dbo.A JOIN dbo.B ON 1=1 JOIN dbo.C ON 1=1; EXEC dbo.usp_Refresh",
            ))
        })
    });

    let records: Vec<LineageRecord> = rows
        .iter()
        .flat_map(|row| analyzer.analyze(container, row.table_name.as_deref(), &row.expression))
        .collect();
    group.bench_function("report_build", |b| {
        b.iter(|| Report::build(black_box(records.clone()), "; "))
    });

    group.finish();
}

criterion_group!(benches, benchmark_analysis);
criterion_main!(benches);
