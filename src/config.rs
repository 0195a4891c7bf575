pub const DATA_SAMPLE_RATE_HZ: u32 = 44100;
pub const CHANNELS: u8 = 1;
pub const SAMPLE_SIZE: u8 = 16;
// One second of tone, looped by the stream
pub const TONE_DURATION_US: u64 = 1_000_000;
// Longest buffer the generator will render (ten minutes)
pub const MAX_TONE_DURATION_US: u64 = 600_000_000;
