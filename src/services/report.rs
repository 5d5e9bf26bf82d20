use crate::models::site::{CalculationResult, Locale, Summary};

struct Labels {
    tilt: &'static str,
    panel_count: &'static str,
    units: &'static str,
    total_power: &'static str,
}

const EN: Labels = Labels {
    tilt: "Ideal tilt",
    panel_count: "Number of panels",
    units: "units",
    total_power: "Total power",
};

const PT_BR: Labels = Labels {
    tilt: "Inclinação ideal",
    panel_count: "Número de placas",
    units: "unidades",
    total_power: "Potência total",
};

fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::En => &EN,
        Locale::PtBr => &PT_BR,
    }
}

/// Render the three result lines: tilt to 1 decimal, power to 2 decimals.
pub fn summarize(result: &CalculationResult, locale: Locale) -> Summary {
    let l = labels(locale);
    Summary {
        tilt: format!("{}: {:.1}°", l.tilt, result.tilt_deg),
        panel_count: format!("{}: {} {}", l.panel_count, result.panel_count, l.units),
        total_power: format!("{}: {:.2} kW", l.total_power, result.total_power_kw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> CalculationResult {
        CalculationResult { tilt_deg: 21.01, panel_count: 17, total_power_kw: 7.65 }
    }

    #[test]
    fn test_english_summary() {
        let s = summarize(&reference(), Locale::En);
        assert_eq!(s.tilt, "Ideal tilt: 21.0°");
        assert_eq!(s.panel_count, "Number of panels: 17 units");
        assert_eq!(s.total_power, "Total power: 7.65 kW");
    }

    #[test]
    fn test_portuguese_summary() {
        let s = summarize(&reference(), Locale::PtBr);
        assert_eq!(s.tilt, "Inclinação ideal: 21.0°");
        assert_eq!(s.panel_count, "Número de placas: 17 unidades");
        assert_eq!(s.total_power, "Potência total: 7.65 kW");
    }

    #[test]
    fn test_zero_power_formatting() {
        let r = CalculationResult { tilt_deg: 3.1, panel_count: 0, total_power_kw: 0.0 };
        let s = summarize(&r, Locale::En);
        assert_eq!(s.tilt, "Ideal tilt: 3.1°");
        assert_eq!(s.total_power, "Total power: 0.00 kW");
    }
}
