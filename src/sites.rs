//! Maya archaeological site data
//!
//! Hardcoded lookup from artifact-code prefixes to sites. Coordinates
//! come from academic sources and archaeological databases. Many codes
//! carry suffixes for the inscribed object (S stela, T temple, HS
//! hieroglyphic stairway), so resolution takes the LONGEST table key
//! that prefixes the artifact code's leading letters.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// An archaeological site (or codex holding location)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub name: &'static str,
    /// One of North, East, Central, Usmacinta, South
    pub region: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lng: f64,
}

const fn site(
    name: &'static str,
    region: &'static str,
    country: &'static str,
    lat: f64,
    lng: f64,
) -> Site {
    Site {
        name,
        region,
        country,
        lat,
        lng,
    }
}

const CALAKMUL: Site = site("Calakmul", "Central", "Mexico", 18.1050, -89.8119);
const COPAN: Site = site("Copan", "East", "Honduras", 14.8403, -89.1422);
const NARANJO: Site = site("Naranjo", "Central", "Guatemala", 17.1667, -89.2167);
const PIEDRAS_NEGRAS: Site = site("Piedras Negras", "Usmacinta", "Guatemala", 17.1500, -91.0167);
const YAXCHILAN: Site = site("Yaxchilan", "Usmacinta", "Mexico", 16.8989, -91.0000);
const PALENQUE: Site = site("Palenque", "Usmacinta", "Mexico", 17.4839, -92.0460);
const TIKAL: Site = site("Tikal", "Central", "Guatemala", 17.2221, -89.6236);
const CARACOL: Site = site("Caracol", "East", "Belize", 16.7628, -89.1156);
const QUIRIGUA: Site = site("Quirigua", "East", "Guatemala", 15.2728, -89.0292);
const COBA: Site = site("Coba", "North", "Mexico", 20.4950, -87.7344);
const DOS_PILAS: Site = site("Dos Pilas", "Central", "Guatemala", 16.5100, -90.2200);
const PUSILA: Site = site("Pusila", "East", "Belize", 16.2167, -89.1167);
const EL_PERU: Site = site("El Peru", "Central", "Guatemala", 17.6167, -90.6000);
const TORTUGUERO: Site = site("Tortuguero", "Usmacinta", "Mexico", 17.5000, -92.9500);
const LA_CORONA: Site = site("La Corona", "Central", "Guatemala", 17.6333, -90.5667);
const EL_NARANJO: Site = site("El Naranjo", "Central", "Guatemala", 17.4667, -90.8500);
const CHINKULTIC: Site = site("Chinkultic", "South", "Mexico", 16.1167, -91.7833);
const MORAL_REFORMA: Site = site("Moral-Reforma", "Usmacinta", "Mexico", 18.0500, -91.7667);
const AGUATECA: Site = site("Aguateca", "Central", "Guatemala", 16.4500, -90.1833);
const ALTAR: Site = site("Altar de Sacrificios", "Usmacinta", "Guatemala", 16.4667, -90.8000);
const BONAMPAK: Site = site("Bonampak", "Usmacinta", "Mexico", 16.7050, -91.0658);
const UAXACTUN: Site = site("Uaxactun", "Central", "Guatemala", 17.4000, -89.6333);
const MACHAQUILA: Site = site("Machaquila", "Central", "Guatemala", 16.4000, -90.0833);
const XULTUN: Site = site("Xultun", "Central", "Guatemala", 17.7167, -89.5167);
const ITZIMTE: Site = site("Itzimte", "Central", "Guatemala", 16.4833, -90.1167);
const SEIBAL: Site = site("Seibal", "Central", "Guatemala", 16.5167, -90.1500);
const EK_BALAM: Site = site("Ek Balam", "North", "Mexico", 20.8833, -88.0833);
const CAMPECHE: Site = site("Campeche", "Central", "Mexico", 19.8467, -90.5244);
const OXPEMUL: Site = site("Oxpemul", "Central", "Mexico", 18.5000, -89.4500);
const EDZNA: Site = site("Edzna", "North", "Mexico", 19.5950, -90.2322);
const UXMAL: Site = site("Uxmal", "North", "Mexico", 20.3597, -89.7711);
const UXUL: Site = site("Uxul", "Central", "Mexico", 18.1667, -89.5833);
const NIMLI_PUNIT: Site = site("Nimli Punit", "East", "Belize", 16.3833, -88.7833);
const IXKUN: Site = site("Ixkun", "East", "Guatemala", 16.8500, -89.4167);
const NAKUM: Site = site("Nakum", "Central", "Guatemala", 17.1500, -89.4333);
const SACUL: Site = site("Sacul", "Central", "Guatemala", 16.8167, -89.3333);
const DZIBANCHE: Site = site("Dzibanche", "Central", "Mexico", 18.6500, -88.7333);
const POLOL: Site = site("Polol", "Central", "Guatemala", 16.5333, -90.1833);
const TAMARINDITO: Site = site("Tamarindito", "Central", "Guatemala", 16.5667, -90.3000);
const YULA: Site = site("Yula", "Central", "Guatemala", 16.3500, -89.9833);
const TONINA: Site = site("Tonina", "Central", "Mexico", 16.9033, -92.0108);
const MADRID: Site = site("Madrid Codex", "North", "Spain (Codex)", 20.0, -89.0);
const DRESDEN: Site = site("Dresden Codex", "North", "Germany (Codex)", 20.0, -89.0);
const PARIS: Site = site("Paris Codex", "North", "France (Codex)", 20.0, -89.0);

/// Artifact-code prefix table
pub const SITE_MAPPINGS: &[(&str, Site)] = &[
    // Calakmul (Campeche, Mexico)
    ("COLK", CALAKMUL),
    ("COLM", CALAKMUL),
    ("COLC", CALAKMUL),
    ("COLL", CALAKMUL),
    ("COLS", CALAKMUL),
    ("COLP", CALAKMUL),
    ("COLH", CALAKMUL),
    ("COLDO", CALAKMUL),
    ("COLLC", CALAKMUL),
    ("COLFRM", CALAKMUL),
    ("COLMPV", CALAKMUL),
    ("COLMS", CALAKMUL),
    ("COLCNCP", CALAKMUL),
    ("CLK", CALAKMUL),
    ("CLKS", CALAKMUL),
    // Post-Classic codices
    ("MAD", MADRID),
    ("DRE", DRESDEN),
    ("PAR", PARIS),
    // Copan (Honduras)
    ("CPN", COPAN),
    ("CPNS", COPAN),
    ("CPNA", COPAN),
    ("CPNT", COPAN),
    ("CPNHSB", COPAN),
    ("CPNHSA", COPAN),
    // Naranjo (Guatemala)
    ("NAR", NARANJO),
    ("NARS", NARANJO),
    ("NARA", NARANJO),
    // Piedras Negras (Guatemala)
    ("PNG", PIEDRAS_NEGRAS),
    ("PNGS", PIEDRAS_NEGRAS),
    ("PNGP", PIEDRAS_NEGRAS),
    ("PNGA", PIEDRAS_NEGRAS),
    // Tonina (Mexico)
    ("TNAM", TONINA),
    // Yaxchilan (Mexico)
    ("YAX", YAXCHILAN),
    ("YAXL", YAXCHILAN),
    ("YAXS", YAXCHILAN),
    ("YAXHS", YAXCHILAN),
    // Palenque (Mexico)
    ("PAL", PALENQUE),
    ("PALT", PALENQUE),
    ("PALTI", PALENQUE),
    ("PALPT", PALENQUE),
    ("PALTC", PALENQUE),
    ("PALTFC", PALENQUE),
    ("PALTS", PALENQUE),
    ("PALTCI", PALENQUE),
    ("PALKTT", PALENQUE),
    // Tikal (Guatemala)
    ("TIK", TIKAL),
    ("TIKS", TIKAL),
    ("TIKT", TIKAL),
    ("TIKK", TIKAL),
    ("TIKMT", TIKAL),
    ("TIKTIP", TIKAL),
    // Caracol (Belize)
    ("CRC", CARACOL),
    ("CRCS", CARACOL),
    ("CRCA", CARACOL),
    ("CRCE", CARACOL),
    ("CRCHS", CARACOL),
    // Quirigua (Guatemala)
    ("QRG", QUIRIGUA),
    ("QRGS", QUIRIGUA),
    ("QRGA", QUIRIGUA),
    ("QRGZP", QUIRIGUA),
    ("QRGZG", QUIRIGUA),
    // Coba (Mexico)
    ("COB", COBA),
    ("COBS", COBA),
    // Dos Pilas (Guatemala)
    ("DPL", DOS_PILAS),
    ("DPLS", DOS_PILAS),
    ("DPLHS", DOS_PILAS),
    ("DPLP", DOS_PILAS),
    // Pusila (Belize)
    ("PUS", PUSILA),
    ("PUSS", PUSILA),
    // El Peru / Waka (Guatemala)
    ("PRU", EL_PERU),
    ("PRUS", EL_PERU),
    // Tortuguero (Mexico)
    ("TRT", TORTUGUERO),
    ("TRTM", TORTUGUERO),
    // La Corona (Guatemala)
    ("CRN", LA_CORONA),
    ("CRNP", LA_CORONA),
    ("CRNHS", LA_CORONA),
    ("CRNA", LA_CORONA),
    ("CRNHSA", LA_CORONA),
    // El Naranjo (Guatemala)
    ("NTN", EL_NARANJO),
    ("NTND", EL_NARANJO),
    // Chinkultic (Mexico)
    ("CHN", CHINKULTIC),
    ("CHNT", CHINKULTIC),
    ("CHNC", CHINKULTIC),
    ("CHNS", CHINKULTIC),
    ("CHNLML", CHINKULTIC),
    // Moral-Reforma (Mexico)
    ("MRL", MORAL_REFORMA),
    ("MRLS", MORAL_REFORMA),
    // Aguateca (Guatemala)
    ("AGT", AGUATECA),
    ("AGTS", AGUATECA),
    // Altar de Sacrificios (Guatemala)
    ("ALS", ALTAR),
    ("ALSS", ALTAR),
    // Bonampak (Mexico)
    ("BPK", BONAMPAK),
    ("BPKM", BONAMPAK),
    ("BPKSS", BONAMPAK),
    ("BKPKOKV", BONAMPAK),
    // Uaxactun (Guatemala)
    ("UAX", UAXACTUN),
    ("UAXS", UAXACTUN),
    ("UAXB", UAXACTUN),
    // Machaquila (Guatemala)
    ("MQL", MACHAQUILA),
    ("MQLS", MACHAQUILA),
    // Xultun (Guatemala)
    ("XUL", XULTUN),
    ("XULS", XULTUN),
    // Itzimte (Guatemala)
    ("ITN", ITZIMTE),
    ("ITNS", ITZIMTE),
    ("ITSS", ITZIMTE),
    // Seibal (Guatemala)
    ("SBL", SEIBAL),
    ("SBLS", SEIBAL),
    ("SBLT", SEIBAL),
    // Ek Balam (Mexico)
    ("EKB", EK_BALAM),
    ("EKBM", EK_BALAM),
    // Campeche (Mexico)
    ("CML", CAMPECHE),
    ("CMLU", CAMPECHE),
    // Oxpemul (Mexico)
    ("OXP", OXPEMUL),
    ("OXPS", OXPEMUL),
    // Edzna (Mexico)
    ("EDZ", EDZNA),
    ("EDZS", EDZNA),
    // Uxmal (Mexico)
    ("UXM", UXMAL),
    ("UXMM", UXMAL),
    // Uxul (Mexico)
    ("UXL", UXUL),
    ("UXLS", UXUL),
    // Nimli Punit (Belize)
    ("NMP", NIMLI_PUNIT),
    ("NMPS", NIMLI_PUNIT),
    // Ixkun (Guatemala)
    ("IXK", IXKUN),
    ("IXKS", IXKUN),
    // Nakum (Guatemala)
    ("NCT", NAKUM),
    ("NCTS", NAKUM),
    // Sacul (Guatemala)
    ("SCU", SACUL),
    ("SCUS", SACUL),
    // Dzibanche (Mexico)
    ("DCB", DZIBANCHE),
    ("DCBS", DZIBANCHE),
    // Polol (Guatemala)
    ("PLM", POLOL),
    ("PLMHS", POLOL),
    // Tamarindito (Guatemala)
    ("TAM", TAMARINDITO),
    ("TAMHS", TAMARINDITO),
    // Yula (Guatemala)
    ("YUL", YULA),
    ("YULYL", YULA),
];

fn site_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z]+)").expect("valid regex"))
}

/// The leading uppercase-letter run of an artifact code, or None for
/// empty / placeholder codes
pub fn extract_site_code(artifact_code: &str) -> Option<&str> {
    if artifact_code.is_empty() || artifact_code == "_" {
        return None;
    }
    site_code_re()
        .captures(artifact_code)
        .map(|caps| caps.get(1).expect("group 1").as_str())
}

/// Resolve an artifact code to a site.
///
/// Among table keys that prefix the code's leading letters, the longest
/// wins. Returns the matched key (stored as the block's site_code) and
/// the site.
pub fn resolve_site(artifact_code: &str) -> Option<(&'static str, &'static Site)> {
    let code = extract_site_code(artifact_code)?;
    SITE_MAPPINGS
        .iter()
        .filter(|(key, _)| code.starts_with(key))
        .max_by_key(|(key, _)| key.len())
        .map(|(key, site)| (*key, site))
}

/// All sites, deduplicated by name
pub fn unique_sites() -> BTreeMap<&'static str, &'static Site> {
    let mut sites = BTreeMap::new();
    for (_, site) in SITE_MAPPINGS {
        sites.entry(site.name).or_insert(site);
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_site_code() {
        assert_eq!(extract_site_code("YAXL23"), Some("YAXL"));
        assert_eq!(extract_site_code("PNG"), Some("PNG"));
        assert_eq!(extract_site_code("_"), None);
        assert_eq!(extract_site_code(""), None);
        assert_eq!(extract_site_code("9K"), None);
    }

    #[test]
    fn test_resolve_exact() {
        let (code, site) = resolve_site("TIK").unwrap();
        assert_eq!(code, "TIK");
        assert_eq!(site.name, "Tikal");
        assert_eq!(site.region, "Central");
    }

    #[test]
    fn test_resolve_longest_prefix_wins() {
        // CRNHS and CRN both prefix "CRNHSA"; CRNHSA itself is longest
        let (code, site) = resolve_site("CRNHSA").unwrap();
        assert_eq!(code, "CRNHSA");
        assert_eq!(site.name, "La Corona");

        // "PALTX" matches PAL and PALT; PALT is longer
        let (code, site) = resolve_site("PALTX").unwrap();
        assert_eq!(code, "PALT");
        assert_eq!(site.name, "Palenque");
    }

    #[test]
    fn test_resolve_ignores_trailing_digits() {
        let (code, site) = resolve_site("YAXL7").unwrap();
        assert_eq!(code, "YAXL");
        assert_eq!(site.name, "Yaxchilan");
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(resolve_site("ZZZ9").is_none());
        assert!(resolve_site("_").is_none());
    }

    #[test]
    fn test_unique_sites_dedup_by_name() {
        let sites = unique_sites();
        // Calakmul appears under 15 prefixes but only once here
        assert!(sites.contains_key("Calakmul"));
        assert!(sites.len() < SITE_MAPPINGS.len());
    }
}
