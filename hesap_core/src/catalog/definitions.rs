//! The nine calculator definitions, in menu order.

use super::{CalculatorDefinition, InputField};
use crate::input::InputValues;

/// All calculators, in the order the menu lists them.
pub static DEFINITIONS: &[CalculatorDefinition] = &[
    DEPREM_YUKU,
    BASINC,
    POMPA_GUCU,
    ISIL_GUC,
    HAVALANDIRMA_DEBISI,
    FAN_GUCU,
    MEKANIK_GUC,
    DONME_MOMENTUMU,
    ISIL_GENLESME,
];

// -----------------------------------------------------------------------------
// Deprem Yükü: F = SDS * Wp * ((1 + 2z/h) / (Rp/Ip))
// -----------------------------------------------------------------------------

const DEPREM_YUKU: CalculatorDefinition = CalculatorDefinition::new(
    "deprem-yuku",
    "Deprem Yükü Hesaplama",
    "Deprem Yükü",
    "F = SDS·Wp·((1 + 2z/h) / (Rp/Ip))",
    "h > 0 ve Rp > 0",
    &[
        InputField::new("SDS", "SDS", "SDS", ""),
        InputField::new("Wp", "Wp", "Ekipman Ağırlığı (Wp)", "kN"),
        InputField::new("z", "z", "Kat Yüksekliği (z)", "m"),
        InputField::new("h", "h", "Bina Yüksekliği (h)", "m"),
        InputField::new("Rp", "Rp", "Davranış Katsayısı (Rp)", "").with_default(1.0),
        InputField::new("Ip", "Ip", "Önem Katsayısı (Ip)", "").with_default(1.0),
    ],
    ("Deprem Yükü", "F", "kN"),
    2,
    seismic_load,
    seismic_load_valid,
);

fn seismic_load(v: &InputValues) -> f64 {
    let (sds, wp, z, h, rp, ip) = (v.get("SDS"), v.get("Wp"), v.get("z"), v.get("h"), v.get("Rp"), v.get("Ip"));
    sds * wp * ((1.0 + (2.0 * z) / h) / (rp / ip))
}

fn seismic_load_valid(v: &InputValues) -> bool {
    v.get("h") > 0.0 && v.get("Rp") > 0.0
}

// -----------------------------------------------------------------------------
// Basınç: P = F / A
// -----------------------------------------------------------------------------

const BASINC: CalculatorDefinition = CalculatorDefinition::new(
    "basinc",
    "Basınç Hesaplama",
    "Basınç",
    "P = F / A",
    "A > 0",
    &[
        InputField::new("F", "F", "Kuvvet (F)", "N"),
        InputField::new("A", "A", "Alan (A)", "m²"),
    ],
    ("Basınç", "P", "Pa"),
    2,
    pressure,
    pressure_valid,
);

fn pressure(v: &InputValues) -> f64 {
    v.get("F") / v.get("A")
}

fn pressure_valid(v: &InputValues) -> bool {
    v.get("A") > 0.0
}

// -----------------------------------------------------------------------------
// Pompa Gücü: P = (Q * H * γ) / η
// -----------------------------------------------------------------------------

const POMPA_GUCU: CalculatorDefinition = CalculatorDefinition::new(
    "pompa-gucu",
    "Pompa Gücü Hesaplama",
    "Pompa Gücü",
    "P = (Q·H·γ) / η",
    "η > 0",
    &[
        InputField::new("Q", "Q", "Debi (Q)", "m³/s"),
        InputField::new("H", "H", "Basma Yüksekliği (H)", "m"),
        // water
        InputField::new("gamma", "γ", "Sıvı Birim Ağırlığı (γ)", "N/m³").with_default(9810.0),
        InputField::new("eta", "η", "Verim (η)", "").with_default(0.85),
    ],
    ("Pompa Gücü", "P", "W"),
    2,
    pump_power,
    efficiency_valid,
);

fn pump_power(v: &InputValues) -> f64 {
    (v.get("Q") * v.get("H") * v.get("gamma")) / v.get("eta")
}

fn efficiency_valid(v: &InputValues) -> bool {
    v.get("eta") > 0.0
}

// -----------------------------------------------------------------------------
// Isıl Güç: Q = m * cp * ΔT (cp in kJ/kgK, so the result is kW)
// -----------------------------------------------------------------------------

const ISIL_GUC: CalculatorDefinition = CalculatorDefinition::new(
    "isil-guc",
    "Isıl Güç Hesaplama",
    "Isıl Güç",
    "Q = m·cp·ΔT",
    "m > 0, cp > 0 ve ΔT > 0",
    &[
        InputField::new("m", "m", "Kütle Debisi (m)", "kg/s"),
        InputField::new("cp", "cp", "Özgül Isı Kapasitesi (cp)", "kJ/kgK"),
        InputField::new("deltaT", "ΔT", "Sıcaklık Farkı (ΔT)", "K"),
    ],
    ("Isıl Güç", "Q", "kW"),
    2,
    thermal_power,
    thermal_power_valid,
);

fn thermal_power(v: &InputValues) -> f64 {
    v.get("m") * v.get("cp") * v.get("deltaT")
}

fn thermal_power_valid(v: &InputValues) -> bool {
    v.get("m") > 0.0 && v.get("cp") > 0.0 && v.get("deltaT") > 0.0
}

// -----------------------------------------------------------------------------
// Havalandırma Debisi: Q = (n * V) / 3600
// -----------------------------------------------------------------------------

const SECONDS_PER_HOUR: f64 = 3600.0;

const HAVALANDIRMA_DEBISI: CalculatorDefinition = CalculatorDefinition::new(
    "havalandirma-debisi",
    "Havalandırma Debisi Hesaplama",
    "Havalandırma Debisi",
    "Q = (n·V) / 3600",
    "n > 0 ve V > 0",
    &[
        InputField::new("n", "n", "Hava Değişim Sayısı (n)", "1/saat"),
        InputField::new("V", "V", "Hacim (V)", "m³"),
    ],
    ("Debi", "Q", "m³/s"),
    2,
    ventilation_flow,
    ventilation_flow_valid,
);

fn ventilation_flow(v: &InputValues) -> f64 {
    (v.get("n") * v.get("V")) / SECONDS_PER_HOUR
}

fn ventilation_flow_valid(v: &InputValues) -> bool {
    v.get("n") > 0.0 && v.get("V") > 0.0
}

// -----------------------------------------------------------------------------
// Fan Gücü: P = (Q * Δp) / η
// -----------------------------------------------------------------------------

const FAN_GUCU: CalculatorDefinition = CalculatorDefinition::new(
    "fan-gucu",
    "Fan Gücü Hesaplama",
    "Fan Gücü",
    "P = (Q·Δp) / η",
    "η > 0",
    &[
        InputField::new("Q", "Q", "Debi (Q)", "m³/s"),
        InputField::new("dp", "Δp", "Basınç Farkı (Δp)", "Pa"),
        InputField::new("eta", "η", "Verim (η)", "").with_default(1.0),
    ],
    ("Fan Gücü", "P", "W"),
    2,
    fan_power,
    efficiency_valid,
);

fn fan_power(v: &InputValues) -> f64 {
    (v.get("Q") * v.get("dp")) / v.get("eta")
}

// -----------------------------------------------------------------------------
// Mekanik Güç: P = T * ω
// -----------------------------------------------------------------------------

const MEKANIK_GUC: CalculatorDefinition = CalculatorDefinition::new(
    "mekanik-guc",
    "Mekanik Güç Hesaplama",
    "Mekanik Güç",
    "P = T·ω",
    "T > 0 ve ω > 0",
    &[
        InputField::new("T", "T", "Tork (T)", "N·m"),
        InputField::new("w", "ω", "Açısal Hız (ω)", "rad/s"),
    ],
    ("Mekanik Güç", "P", "W"),
    2,
    mechanical_power,
    mechanical_power_valid,
);

fn mechanical_power(v: &InputValues) -> f64 {
    v.get("T") * v.get("w")
}

fn mechanical_power_valid(v: &InputValues) -> bool {
    v.get("T") > 0.0 && v.get("w") > 0.0
}

// -----------------------------------------------------------------------------
// Dönme Momentumu: L = I * ω
// -----------------------------------------------------------------------------

const DONME_MOMENTUMU: CalculatorDefinition = CalculatorDefinition::new(
    "donme-momentumu",
    "Dönme Momentumu Hesaplama",
    "Dönme Momentumu",
    "L = I·ω",
    "I > 0 ve ω > 0",
    &[
        InputField::new("I", "I", "Atalet Momenti (I)", "kg·m²"),
        InputField::new("w", "ω", "Açısal Hız (ω)", "rad/s"),
    ],
    ("Dönme Momentumu", "L", "kg·m²/s"),
    2,
    angular_momentum,
    angular_momentum_valid,
);

fn angular_momentum(v: &InputValues) -> f64 {
    v.get("I") * v.get("w")
}

fn angular_momentum_valid(v: &InputValues) -> bool {
    v.get("I") > 0.0 && v.get("w") > 0.0
}

// -----------------------------------------------------------------------------
// Isıl Genleşme: ΔL = L0 * α * ΔT (ΔT may be negative: contraction)
// -----------------------------------------------------------------------------

const ISIL_GENLESME: CalculatorDefinition = CalculatorDefinition::new(
    "isil-genlesme",
    "Isıl Genleşme Hesaplama",
    "Isıl Genleşme",
    "ΔL = L0·α·ΔT",
    "L0 > 0, α > 0 ve ΔT ≠ 0",
    &[
        InputField::new("L0", "L₀", "İlk Uzunluk (L₀)", "m"),
        InputField::new("alpha", "α", "Genleşme Katsayısı (α)", "1/°C"),
        InputField::new("deltaT", "ΔT", "Sıcaklık Farkı (ΔT)", "°C"),
    ],
    ("Uzama", "ΔL", "m"),
    6,
    thermal_expansion,
    thermal_expansion_valid,
);

fn thermal_expansion(v: &InputValues) -> f64 {
    v.get("L0") * v.get("alpha") * v.get("deltaT")
}

fn thermal_expansion_valid(v: &InputValues) -> bool {
    v.get("L0") > 0.0 && v.get("alpha") > 0.0 && v.get("deltaT") != 0.0
}
