use mini3di::model::{Activation, DenseLayer, Layer, Model};
use mini3di::processing::DESCRIPTOR_SIZE;
use mini3di::{ChainCoords, Codebook, Encoder, EncoderConfig, ModelParameters, ResidueCoords};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Network with the 3Di topology (10 -> 10 -> 10 -> 2) and seeded weights
fn random_params(seed: u64) -> ModelParameters {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut dense = |inputs: usize, outputs: usize, activation: Activation| {
        let weights = (0..inputs * outputs).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let biases = (0..outputs).map(|_| rng.gen_range(-0.5..0.5)).collect();
        Layer::Dense(DenseLayer::new(weights, inputs, outputs, biases, activation).unwrap())
    };
    let layers = vec![
        dense(DESCRIPTOR_SIZE, 10, Activation::Relu),
        dense(10, 10, Activation::Relu),
        dense(10, 2, Activation::Linear),
    ];
    ModelParameters::new(Model::new(layers).unwrap(), Codebook::reference_3di()).unwrap()
}

fn encoder() -> Encoder {
    Encoder::new(random_params(7), EncoderConfig::default()).unwrap()
}

/// Ideal α-helix: 100° per residue, 1.5 Å rise, Cα radius 2.3 Å
fn helix(len: usize) -> ChainCoords {
    (0..len)
        .map(|i| {
            let t = (100.0 * i as f32).to_radians();
            let z = 1.5 * i as f32;
            let at = |radius: f32, dt: f32, dz: f32| {
                let a = t + dt.to_radians();
                [radius * a.cos(), radius * a.sin(), z + dz]
            };
            ResidueCoords::new(at(2.3, 0.0, 0.0), at(1.6, -28.0, -0.9), at(1.7, 26.0, 0.8))
        })
        .collect()
}

fn expected_mask(encoder: &Encoder, chain: &ChainCoords) -> Vec<bool> {
    let (frames, partners) = encoder.partners(chain);
    let n = frames.len();
    let window = |k: usize| k > 0 && k + 1 < n && frames[k - 1..=k + 1].iter().all(Option::is_some);
    // Residue 0 as a partner takes the last residue as its predecessor
    let partner_window =
        |k: usize| k + 1 < n && [(k + n - 1) % n, k, k + 1].iter().all(|&m| frames[m].is_some());
    (0..chain.len())
        .map(|i| match partners.get(i) {
            Some(j) => window(i) && partner_window(j),
            None => false,
        })
        .collect()
}

/// Network whose latent is (clamped sequence separation, 0), with centroid 0
/// at separation -1 and centroid 1 at +1
fn separation_params() -> ModelParameters {
    let mut weights = vec![0.0; DESCRIPTOR_SIZE * 2];
    weights[8 * 2] = 1.0;
    let dense = DenseLayer::new(weights, DESCRIPTOR_SIZE, 2, vec![0.0, 0.0], Activation::Linear).unwrap();
    let model = Model::new(vec![Layer::Dense(dense)]).unwrap();
    let mut centroids = vec![vec![-1.0, 0.0], vec![1.0, 0.0]];
    for k in 2..20 {
        centroids.push(vec![10.0 + k as f32, 10.0]);
    }
    ModelParameters::new(model, Codebook::new(centroids).unwrap()).unwrap()
}

/// Random walk with 3.8 Å Cα steps and N/C scattered around each Cα
fn random_walk(seed: u64, len: usize) -> ChainCoords {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ca = [0.0f32; 3];
    let mut chain = ChainCoords::new();
    for _ in 0..len {
        let mut offset = |scale: f32| -> [f32; 3] {
            let d: [f32; 3] = [rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)];
            let norm = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt().max(1e-3);
            [d[0] * scale / norm, d[1] * scale / norm, d[2] * scale / norm]
        };
        let step = offset(3.8);
        let dn = offset(1.46);
        let dc = offset(1.52);
        ca = [ca[0] + step[0], ca[1] + step[1], ca[2] + step[2]];
        let n = [ca[0] + dn[0], ca[1] + dn[1], ca[2] + dn[2]];
        let c = [ca[0] + dc[0], ca[1] + dc[1], ca[2] + dc[2]];
        chain.push(ResidueCoords::new(ca, n, c));
    }
    chain
}

/// Next representable value away from zero
fn next_ulp(x: f32) -> f32 {
    f32::from_bits(x.to_bits() + 1)
}

#[test]
fn test_helix_turn_golden() {
    // Literal coordinates of three helical residues
    let chain: ChainCoords = vec![
        ResidueCoords::new([2.300, 0.000, 0.000], [1.413, -0.751, -0.900], [1.528, 0.745, 0.800])
            .with_cb([3.160, -0.620, 1.150]),
        ResidueCoords::new([-0.399, 2.265, 1.500], [0.493, 1.520, 0.600], [-1.013, 1.374, 2.300]),
        ResidueCoords::new([-2.161, -0.787, 3.000], [-1.905, 0.775, 2.100], [-1.354, -1.075, 3.800]),
    ]
    .into_iter()
    .collect();

    // Terminal residues have no neighbour on one side; the middle residue has
    // no other interior residue and pairs with residue 0 (separation -1)
    let encoder = Encoder::new(separation_params(), EncoderConfig::default()).unwrap();
    let encoded = encoder.encode(&chain);
    assert_eq!(encoder.partners(&chain).1.as_slice(), &[None, Some(0), None]);
    assert_eq!(encoded.states, vec![20, 0, 20]);
    assert_eq!(encoder.build_sequence(&encoded), "XAX");

    // Any network encodes the middle residue and only it
    let encoded = self::encoder().encode(&chain);
    assert_eq!(encoded.mask, vec![false, true, false]);
}

#[test]
fn test_single_and_empty_chain() {
    let encoder = encoder();

    let single: ChainCoords = helix(1);
    assert_eq!(encoder.encode_sequence(&single), "X");

    let empty = ChainCoords::new();
    let encoded = encoder.encode(&empty);
    assert!(encoded.is_empty());
    assert_eq!(encoder.build_sequence(&encoded), "");
}

#[test]
fn test_all_invalid_chain() {
    let encoder = encoder();
    let chain: ChainCoords = (0..9).map(|_| ResidueCoords::missing()).collect();

    let encoded = encoder.encode(&chain);
    assert_eq!(encoded.len(), 9);
    assert_eq!(encoded.num_encoded(), 0);
    assert_eq!(encoder.build_sequence(&encoded), "XXXXXXXXX");
}

#[test]
fn test_helix_interior_encoded() {
    let encoder = encoder();
    let chain = helix(12);
    let encoded = encoder.encode(&chain);
    let sequence = encoder.build_sequence(&encoded);

    assert_eq!(sequence.chars().count(), 12);
    assert!(sequence.starts_with('X'));
    assert!(sequence.ends_with('X'));
    assert_eq!(encoded.mask, expected_mask(&encoder, &chain));
    assert_eq!(encoded.num_encoded(), 10);
    for (state, valid) in encoded.states.iter().zip(&encoded.mask) {
        assert!(*state <= 20);
        assert_eq!(*valid, *state < 20);
    }
}

#[test]
fn test_missing_residue_masks_windows() {
    let encoder = encoder();
    let mut chain = helix(16);
    chain.ca[7] = [f32::NAN; 3];

    let encoded = encoder.encode(&chain);
    assert!(encoded.is_masked(6));
    assert!(encoded.is_masked(7));
    assert!(encoded.is_masked(8));
    assert_eq!(encoded.mask, expected_mask(&encoder, &chain));

    // Other residues are unaffected unless their partner window touched 7
    let (_, partners) = encoder.partners(&chain);
    for i in [2, 3, 12, 13] {
        let j = partners.get(i).unwrap();
        if !(6..=8).contains(&j) {
            assert!(!encoded.is_masked(i), "residue {} should be encoded", i);
        }
    }
}

#[test]
fn test_missing_cb_only_is_not_masked() {
    let encoder = encoder();
    let chain = helix(10);
    let mut with_cb = chain.clone();
    let frames = encoder.partners(&chain).0;
    for (i, frame) in frames.iter().enumerate() {
        with_cb.cb[i] = frame.unwrap().cb;
    }

    // Supplying the reconstructed Cβ explicitly gives the same result
    assert_eq!(encoder.encode(&chain), encoder.encode(&with_cb));
}

#[test]
fn test_deterministic_on_random_chains() {
    let encoder = encoder();
    let mut rng = StdRng::seed_from_u64(42);

    for len in [0, 1, 2, 5, 17, 40] {
        let chain: ChainCoords = (0..len)
            .map(|_| {
                let mut point = || -> [f32; 3] {
                    [rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0)]
                };
                ResidueCoords::new(point(), point(), point())
            })
            .collect();

        let first = encoder.encode(&chain);
        let second = encoder.encode(&chain);
        assert_eq!(first, second);
        assert_eq!(first.len(), len);
        assert_eq!(encoder.build_sequence(&first).chars().count(), len);
    }
}

#[test]
fn test_sub_epsilon_perturbation() {
    let encoder = encoder();
    let chain = random_walk(11, 30);
    let mut perturbed = chain.clone();
    perturbed.ca[12][0] = next_ulp(chain.ca[12][0]);
    perturbed.n[20][1] = next_ulp(chain.n[20][1]);

    for (before, after) in [(chain.ca[12][0], perturbed.ca[12][0]), (chain.n[20][1], perturbed.n[20][1])] {
        assert_ne!(before.to_bits(), after.to_bits());
        assert!(((after - before) / before).abs() <= f32::EPSILON);
    }

    let encoded = encoder.encode(&chain);
    assert_eq!(encoded.num_encoded(), 28);
    assert_eq!(encoded, encoder.encode(&perturbed));
}

#[test]
fn test_foldseek_invalid_state() {
    let config = EncoderConfig::default().with_invalid_state(2);
    let encoder = Encoder::new(random_params(7), config).unwrap();
    let encoded = encoder.encode(&helix(6));

    assert_eq!(encoded.states[0], 2);
    assert_eq!(encoded.states[5], 2);
    assert!(encoded.is_masked(0));
    assert!(encoder.build_sequence(&encoded).starts_with('X'));
}

#[test]
fn test_independent_encoders() {
    let a = Encoder::new(random_params(1), EncoderConfig::default()).unwrap();
    let b = Encoder::new(random_params(2), EncoderConfig::default()).unwrap();
    let chain = helix(20);

    let encoded_a = a.encode(&chain);
    let encoded_b = b.encode(&chain);
    assert_eq!(encoded_a.mask, encoded_b.mask);
    assert_eq!(a.encode(&chain), encoded_a);
}
