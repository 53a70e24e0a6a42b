/*
 * table_to_tabularx.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! table-to-tabularx - rewrite tables as boxed LaTeX tabularx environments

fn main() -> anyhow::Result<()> {
    texfilter::cli::main_with(
        "table-to-tabularx",
        texfilter::transforms::tabularx_filter(),
    )
}
