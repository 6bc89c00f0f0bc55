//! Gamma line, decay chain and X-ray queries

// external crates
use log::info;

// gtools modules
use gtools_nuclide::{
    ChainGammaAggregator, ChainSpectrum, DecayChain, DecayChainResolver, ElementXrays,
    GammaLineSearch, NuclideLines, SearchHit, XrayLine, XrayLineSearch,
};
use gtools_support::f;

// internal modules
use super::Session;
use crate::cli::{ChainArgs, LinesArgs, SearchArgs, SpectrumArgs, XrayArgs};
use crate::error::Result;

pub fn search(session: &Session, args: &SearchArgs) -> Result<()> {
    let options = args.options(session.options);
    let hits = GammaLineSearch::new(&session.db).search_by_energy(args.energy, &options)?;
    info!(
        "Found {} lines within {} keV of {} keV",
        hits.len(),
        options.delta,
        args.energy
    );
    session.emit(&hits, || hits_text(&hits))
}

pub fn lines(session: &Session, args: &LinesArgs) -> Result<()> {
    let options = args.options(session.options);
    let lines = GammaLineSearch::new(&session.db).lines_for_nuclide(&args.nuclide, &options)?;
    let name = session.db.lookup(&args.nuclide)?.id.to_string();
    session.emit(&lines, || lines_text(&name, &lines))
}

pub fn chain(session: &Session, args: &ChainArgs) -> Result<()> {
    let options = args.options(session.options);
    let chain = DecayChainResolver::new(&session.db).resolve(&args.nuclide, &options)?;
    session.emit(&chain, || match args.brief {
        true => brief_chain_text(&chain),
        false => chain.to_string(),
    })
}

pub fn spectrum(session: &Session, args: &SpectrumArgs) -> Result<()> {
    let options = args.options(session.options);
    let spectrum =
        ChainGammaAggregator::new(&session.db).decay_products_spectrum(&args.nuclide, &options)?;
    session.emit(&spectrum, || spectrum_text(&spectrum))
}

pub fn xray(session: &Session, args: &XrayArgs) -> Result<()> {
    let search = XrayLineSearch::new(&session.db);

    if let Some(element) = &args.element {
        let lines = search.element_xray_lines(element);
        return session.emit(&lines, || element_text(element, &lines));
    }

    // clap guarantees one of the two
    let energy = args.energy.unwrap_or_default();
    let options = args.options(session.options);
    let lines = search.search_xray_line(energy, options.delta)?;
    session.emit(&lines, || xrays_text(&lines))
}

// ! Text output

fn hits_text(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No matching gamma lines".to_string();
    }

    let mut s = f!(
        "{:>14} {:>11}  {:<4} {:>13}  {}\n",
        "Energy",
        "Intensity",
        "Mode",
        "Half-life",
        "Nuclide"
    );
    s += &hits.iter().map(|h| h.to_string()).collect::<Vec<_>>().join("\n");
    s
}

fn lines_text(name: &str, lines: &NuclideLines) -> String {
    if lines.is_empty() {
        return f!("No matching gamma lines for {name}");
    }

    let mut s = f!("Gamma lines of {name}");
    for (energy, intensity) in lines.energies.iter().zip(&lines.intensities) {
        s += &f!("\n{energy:>10.3} keV {intensity:>9.4} %");
    }
    s
}

fn brief_chain_text(chain: &DecayChain) -> String {
    let products = chain
        .ids()
        .map(|id| id.to_string())
        .collect::<Vec<String>>();

    let text = match products.is_empty() {
        true => f!("{} -> none", chain.root),
        false => f!("{} -> {}", chain.root, products.join(", ")),
    };

    let options = textwrap::Options::new(80).subsequent_indent("    ");
    textwrap::fill(&text, options)
}

fn spectrum_text(spectrum: &ChainSpectrum) -> String {
    if spectrum.is_empty() {
        return "No matching gamma lines in the chain".to_string();
    }

    spectrum
        .iter()
        .map(|(nuclide, energy, intensity)| {
            f!(
                "{:<8} {energy:>10.3} keV {intensity:>9.4} %",
                nuclide.to_string()
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn element_text(element: &str, lines: &ElementXrays) -> String {
    if lines.is_empty() {
        return f!("No X-ray lines for {element}");
    }

    let mut s = f!("X-ray lines of {element}");
    for (energy, shell) in lines.energies.iter().zip(&lines.shells) {
        s += &f!("\n{energy:>10.3} keV  {shell}");
    }
    s
}

fn xrays_text(lines: &[XrayLine]) -> String {
    match lines.is_empty() {
        true => "No matching X-ray lines".to_string(),
        false => lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<String>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtools_nuclide::{NuclideDatabase, QueryOptions};

    #[test]
    fn brief_chain_wraps() {
        let db = NuclideDatabase::builtin();
        let chain = DecayChainResolver::new(db)
            .resolve("U-238", &QueryOptions::default())
            .unwrap();

        let text = brief_chain_text(&chain);
        assert!(text.starts_with("U-238 -> Th-234, "));
        assert!(text.lines().count() > 1);
        assert!(text.lines().all(|l| l.len() <= 80));
        assert!(text.lines().skip(1).all(|l| l.starts_with("    ")));
    }

    #[test]
    fn stable_chain_is_empty() {
        let db = NuclideDatabase::builtin();
        let chain = DecayChainResolver::new(db)
            .resolve("Pb-206", &QueryOptions::default())
            .unwrap();
        assert_eq!(brief_chain_text(&chain), "Pb-206 -> none");
    }

    #[test]
    fn lines_are_listed_under_the_nuclide() {
        let lines = NuclideLines {
            energies: vec![1332.492, 1173.228],
            intensities: vec![99.9826, 99.85],
        };
        let text = lines_text("Co-60", &lines);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[0], "Gamma lines of Co-60");
        assert_eq!(rows[1], "  1332.492 keV   99.9826 %");
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn empty_results() {
        assert_eq!(hits_text(&[]), "No matching gamma lines");
        assert_eq!(xrays_text(&[]), "No matching X-ray lines");
        assert_eq!(
            element_text("Xx", &ElementXrays::default()),
            "No X-ray lines for Xx"
        );
    }
}
