/// Writes a small synthetic Pokémon roster CSV for trying out the viewer
/// without downloading the Kaggle dataset.

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform pick in `0..n`.
    fn pick(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

const TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_pokemon.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["name", "type1", "type2", "generation", "hp", "attack", "is_legendary"])
        .expect("Failed to write header");

    let n_rows = 300;
    for i in 0..n_rows {
        let type1 = TYPES[rng.pick(TYPES.len())];
        // Roughly half the roster carries a secondary type.
        let type2 = if rng.pick(2) == 0 {
            TYPES[rng.pick(TYPES.len())]
        } else {
            ""
        };
        let generation = 1 + rng.pick(7);
        let hp = 20 + rng.pick(120);
        let attack = 20 + rng.pick(150);
        let is_legendary = rng.pick(20) == 0;

        writer
            .write_record([
                format!("specimen_{i:03}"),
                type1.to_string(),
                type2.to_string(),
                generation.to_string(),
                hp.to_string(),
                attack.to_string(),
                is_legendary.to_string(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush CSV");
    println!("Wrote {n_rows} records to {output_path}");
}
