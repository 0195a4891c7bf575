//! Colour bands and the fixed frequency behind every button.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    InfraredRed,
    Red,
    RedOrange,
    Orange,
    Yellow,
    YellowGreen,
    Green,
    GreenBlue,
    Blue,
    BlueViolet,
    Violet,
    UltravioletViolet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OctaveStep {
    Down,
    Base,
    Up,
}

impl OctaveStep {
    pub const ALL: [OctaveStep; 3] = [OctaveStep::Down, OctaveStep::Base, OctaveStep::Up];

    /// Button suffix used on the panel
    pub fn suffix(&self) -> &'static str {
        match self {
            OctaveStep::Down => "d1",
            OctaveStep::Base => "0",
            OctaveStep::Up => "u1",
        }
    }
}

// (band, code, name, [down, base, up])
const BAND_TABLE: [(Band, &str, &str, [u32; 3]); 12] = [
    (Band::InfraredRed, "IR", "Infrared/Red", [185, 370, 740]),
    (Band::Red, "R", "Red", [196, 392, 784]),
    (Band::RedOrange, "RO", "Red/Orange", [208, 415, 830]),
    (Band::Orange, "O", "Orange", [220, 440, 880]),
    (Band::Yellow, "Y", "Yellow", [233, 466, 932]),
    (Band::YellowGreen, "YG", "Yellow/Green", [247, 494, 988]),
    (Band::Green, "G", "Green", [262, 523, 1046]),
    (Band::GreenBlue, "GB", "Green/Blue", [277, 554, 1108]),
    (Band::Blue, "B", "Blue", [294, 587, 1174]),
    (Band::BlueViolet, "BV", "Blue/Violet", [311, 622, 1244]),
    (Band::Violet, "V", "Violet", [330, 660, 1320]),
    (Band::UltravioletViolet, "UV", "Ultraviolet/Violet", [350, 700, 1400]),
];

impl Band {
    pub const ALL: [Band; 12] = [
        Band::InfraredRed,
        Band::Red,
        Band::RedOrange,
        Band::Orange,
        Band::Yellow,
        Band::YellowGreen,
        Band::Green,
        Band::GreenBlue,
        Band::Blue,
        Band::BlueViolet,
        Band::Violet,
        Band::UltravioletViolet,
    ];

    fn entry(&self) -> &'static (Band, &'static str, &'static str, [u32; 3]) {
        &BAND_TABLE[*self as usize]
    }

    pub fn code(&self) -> &'static str {
        self.entry().1
    }

    pub fn name(&self) -> &'static str {
        self.entry().2
    }

    pub fn frequency(&self, step: OctaveStep) -> u32 {
        let [down, base, up] = self.entry().3;
        match step {
            OctaveStep::Down => down,
            OctaveStep::Base => base,
            OctaveStep::Up => up,
        }
    }

    /// Panel label for one of this band's buttons, e.g. `IRu1`.
    pub fn button(&self, step: OctaveStep) -> String {
        format!("{}{}", self.code(), step.suffix())
    }
}

/// Parses a panel label such as `O0`, `GBu1` or `IRd1` (case-insensitive).
pub fn parse_button(label: &str) -> Option<(Band, OctaveStep)> {
    let label = label.trim().to_ascii_uppercase();
    Band::ALL.iter().find_map(|band| {
        let rest = label.strip_prefix(band.code())?;
        let step = OctaveStep::ALL
            .into_iter()
            .find(|step| step.suffix().eq_ignore_ascii_case(rest))?;
        Some((*band, step))
    })
}
