//! Drives a view over the bundled product catalog and prints each step.
//!
//! Run with `cargo run -p datagrid-lib --example catalog`. Debug logs go to
//! stderr.

use datagrid_lib::model::Dataset;
use datagrid_lib::table::TableRow;
use datagrid_lib::table::TableView;
use datagrid_lib::view::GroupSpec;
use datagrid_lib::view::PriceRange;
use datagrid_lib::view::SortSpec;
use datagrid_lib::view::ViewState;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

const SAMPLE: &str = include_str!("../data/sample-data.json");

fn print_table(title: &str, table: &TableView<'_>) {
    println!("== {title}");

    let headers: Vec<String> = table
        .headers()
        .iter()
        .map(|h| match h.sort {
            Some(direction) => format!("{} ({direction:?})", h.column.header),
            None => h.column.header.clone(),
        })
        .collect();
    println!("{}", headers.join(" | "));

    for row in table.rows() {
        match row {
            TableRow::Group { header, expanded } => {
                let marker = if *expanded { "v" } else { ">" };
                println!("{marker} {} ({})", header.key, header.member_count());
            }
            TableRow::Record { grouped, .. } => {
                let cells: Vec<String> = table
                    .headers()
                    .iter()
                    .filter_map(|h| row.cell(h.column))
                    .map(|cell| cell.into_owned())
                    .collect();
                let indent = if *grouped { "    " } else { "" };
                println!("{indent}{}", cells.join(" | "));
            }
        }
    }

    let page = table.page();
    println!(
        "page {}/{} ({} rows)\n",
        page.page_index + 1,
        page.page_count,
        page.total_rows
    );
}

fn main() {
    WriteLogger::init(LevelFilter::Debug, Config::default(), std::io::stderr())
        .expect("Failed to initialize logger");

    let dataset = match Dataset::from_json_str(SAMPLE) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let mut view = ViewState::with_catalog(dataset);
    view.set_column_visible("updatedAt", false);
    print_table("default view", &view.table());

    view.set_global_filter("elec");
    view.toggle_sort("price");
    print_table("electronics by price", &view.table());

    view.set_global_filter("");
    view.set_sort(SortSpec::desc("price"));
    view.set_price_range(PriceRange::new(0, 2000));
    view.set_group(GroupSpec::by("category"));
    view.toggle_group_expanded("group-Kitchen");
    view.set_page_size(30);
    print_table("grouped by category", &view.table());
}
