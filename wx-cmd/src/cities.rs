use wx_core::city::City;

/// One line per city: the code padded to a column, then the display name.
pub fn format_cities(cities: &[City]) -> String {
    let width = cities.iter().map(|c| c.code.len()).max().unwrap_or(0);
    cities
        .iter()
        .map(|city| format!("{:<width$}  {}\n", city.code, city.name, width = width))
        .collect()
}

pub fn run_cities() -> anyhow::Result<()> {
    print!("{}", format_cities(&City::all()?));
    Ok(())
}
