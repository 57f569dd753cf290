//! Synthetic dataset generation for the five demo profiles.
//!
//! Each profile is a data-driven generation rule: per-class blocks of
//! per-feature uniform ranges, a labeling mode, and an optional pattern
//! overlay. Samples are emitted in class-contiguous blocks with no shuffle,
//! so the train/test prefix split downstream sees class-ordered data.
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::Serialize;

/// Identifier of a synthetic dataset profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileId {
    Iris,
    Digits,
    Wine,
    BreastCancer,
    Diabetes,
}

impl ProfileId {
    pub const ALL: [ProfileId; 5] = [
        ProfileId::Iris,
        ProfileId::Digits,
        ProfileId::Wine,
        ProfileId::BreastCancer,
        ProfileId::Diabetes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProfileId::Iris => "iris",
            ProfileId::Digits => "digits",
            ProfileId::Wine => "wine",
            ProfileId::BreastCancer => "breast_cancer",
            ProfileId::Diabetes => "diabetes",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

/// Catalog entry describing a profile to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetProfile {
    pub id: ProfileId,
    pub description: String,
    pub features: usize,
    pub samples: usize,
    pub classes: usize,
}

/// A generated labeled sample set.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetData {
    pub data: Vec<Vec<f64>>,
    pub target: Vec<usize>,
    pub feature_names: Vec<String>,
    pub target_names: Vec<String>,
    pub description: String,
}

/// How a block's samples receive their labels.
enum Labeling {
    /// Label = index of the generating class block.
    BlockIndex,
    /// Label computed from the drawn features.
    Derived(fn(&[f64]) -> usize),
}

/// Post-draw adjustment giving selected classes a recognizable structure.
type Overlay = fn(class: usize, features: &mut [f64], rng: &mut ThreadRng);

struct ClassBlock {
    count: usize,
    ranges: Vec<(f64, f64)>,
}

struct GenRule {
    feature_names: Vec<String>,
    target_names: Vec<String>,
    description: &'static str,
    blocks: Vec<ClassBlock>,
    labeling: Labeling,
    overlay: Option<Overlay>,
}

fn names(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn iris_rule() -> GenRule {
    GenRule {
        feature_names: names(&[
            "sepal length (cm)",
            "sepal width (cm)",
            "petal length (cm)",
            "petal width (cm)",
        ]),
        target_names: names(&["setosa", "versicolor", "virginica"]),
        description: "The Iris dataset contains 3 classes of flowers with 4 features each",
        blocks: vec![
            ClassBlock {
                count: 50,
                ranges: vec![(4.3, 5.8), (2.3, 4.4), (1.0, 1.9), (0.1, 0.6)],
            },
            ClassBlock {
                count: 50,
                ranges: vec![(4.9, 7.0), (2.0, 3.4), (3.0, 5.1), (1.0, 1.8)],
            },
            ClassBlock {
                count: 50,
                ranges: vec![(4.9, 7.9), (2.2, 3.8), (4.5, 6.9), (1.4, 2.5)],
            },
        ],
        labeling: Labeling::BlockIndex,
        overlay: None,
    }
}

fn wine_rule() -> GenRule {
    GenRule {
        feature_names: names(&[
            "alcohol",
            "malic_acid",
            "ash",
            "alcalinity_of_ash",
            "magnesium",
            "total_phenols",
            "flavanoids",
            "nonflavanoid_phenols",
            "proanthocyanins",
            "color_intensity",
            "hue",
            "od280/od315_of_diluted_wines",
            "proline",
        ]),
        target_names: names(&["class_0", "class_1", "class_2"]),
        description:
            "The Wine dataset contains results of a chemical analysis of wines grown in the same region in Italy",
        blocks: vec![
            ClassBlock {
                count: 60,
                ranges: vec![
                    (13.0, 14.5),
                    (1.0, 2.0),
                    (1.5, 2.0),
                    (10.0, 15.0),
                    (70.0, 110.0),
                    (1.0, 2.0),
                    (1.0, 2.0),
                    (0.2, 0.4),
                    (1.0, 2.0),
                    (4.0, 6.0),
                    (0.5, 1.0),
                    (1.0, 3.0),
                    (500.0, 1000.0),
                ],
            },
            ClassBlock {
                count: 70,
                ranges: vec![
                    (12.0, 13.5),
                    (2.0, 3.0),
                    (2.0, 2.5),
                    (15.0, 20.0),
                    (80.0, 120.0),
                    (2.0, 3.0),
                    (2.0, 3.0),
                    (0.4, 0.6),
                    (2.0, 3.0),
                    (6.0, 8.0),
                    (1.0, 1.5),
                    (2.0, 4.0),
                    (600.0, 1100.0),
                ],
            },
            ClassBlock {
                count: 50,
                ranges: vec![
                    (14.0, 15.0),
                    (1.5, 2.5),
                    (2.5, 3.0),
                    (20.0, 25.0),
                    (90.0, 130.0),
                    (1.5, 2.5),
                    (0.5, 1.5),
                    (0.3, 0.6),
                    (1.5, 2.5),
                    (8.0, 10.0),
                    (0.8, 1.3),
                    (3.0, 5.0),
                    (700.0, 1200.0),
                ],
            },
        ],
        labeling: Labeling::BlockIndex,
        overlay: None,
    }
}

fn breast_cancer_rule() -> GenRule {
    GenRule {
        feature_names: names(&[
            "mean radius",
            "mean texture",
            "mean perimeter",
            "mean area",
            "mean smoothness",
            "mean compactness",
            "mean concavity",
            "mean concave points",
            "mean symmetry",
            "mean fractal dimension",
        ]),
        target_names: names(&["malignant", "benign"]),
        description: "The Breast Cancer Wisconsin dataset for binary classification",
        blocks: vec![
            ClassBlock {
                count: 180,
                ranges: vec![
                    (15.0, 25.0),
                    (15.0, 25.0),
                    (100.0, 200.0),
                    (500.0, 1300.0),
                    (0.05, 0.15),
                    (0.1, 0.3),
                    (0.1, 0.4),
                    (0.1, 0.3),
                    (0.1, 0.2),
                    (0.05, 0.1),
                ],
            },
            ClassBlock {
                count: 210,
                ranges: vec![
                    (12.0, 20.0),
                    (12.0, 20.0),
                    (70.0, 150.0),
                    (300.0, 900.0),
                    (0.03, 0.1),
                    (0.05, 0.15),
                    (0.05, 0.15),
                    (0.05, 0.15),
                    (0.1, 0.18),
                    (0.04, 0.08),
                ],
            },
        ],
        labeling: Labeling::BlockIndex,
        overlay: None,
    }
}

/// Darkened patterns for digits 0 and 1; other digits stay pure noise, so
/// separability is deliberately asymmetric across classes.
fn digits_overlay(class: usize, features: &mut [f64], rng: &mut ThreadRng) {
    if class == 0 {
        // Central 4x3 block redrawn darker.
        for j in 20..44 {
            if (2..=5).contains(&(j % 8)) {
                features[j] = rng.gen_range(0.0..4.0);
            }
        }
    } else if class == 1 {
        // Dark vertical line in column 3.
        for row in 0..8 {
            features[row * 8 + 3] = 12.0 + rng.gen_range(0.0..4.0);
        }
    }
}

fn digits_rule() -> GenRule {
    let feature_names = (0..64).map(|i| format!("pixel_{}_{}", i / 8, i % 8)).collect();
    let blocks = (0..10)
        .map(|_| ClassBlock { count: 50, ranges: vec![(0.0, 16.0); 64] })
        .collect();
    GenRule {
        feature_names,
        target_names: (0..10).map(|d| d.to_string()).collect(),
        description: "The Digits dataset contains 8x8 images of handwritten digits",
        blocks,
        labeling: Labeling::BlockIndex,
        overlay: Some(digits_overlay),
    }
}

fn diabetes_label(features: &[f64]) -> usize {
    let sum: f64 = features.iter().sum();
    if sum * 2.0 > 0.0 { 1 } else { 0 }
}

fn diabetes_rule() -> GenRule {
    GenRule {
        feature_names: names(&["age", "sex", "bmi", "bp", "s1", "s2", "s3", "s4", "s5", "s6"]),
        target_names: names(&["above_threshold", "below_threshold"]),
        description: "The Diabetes dataset for regression converted to binary classification",
        blocks: vec![ClassBlock { count: 200, ranges: vec![(-0.1, 0.1); 10] }],
        labeling: Labeling::Derived(diabetes_label),
        overlay: None,
    }
}

fn rule_for(id: ProfileId) -> GenRule {
    match id {
        ProfileId::Iris => iris_rule(),
        ProfileId::Digits => digits_rule(),
        ProfileId::Wine => wine_rule(),
        ProfileId::BreastCancer => breast_cancer_rule(),
        ProfileId::Diabetes => diabetes_rule(),
    }
}

fn generate(rule: &GenRule) -> (Vec<Vec<f64>>, Vec<usize>) {
    let mut rng = rand::thread_rng();
    let total: usize = rule.blocks.iter().map(|b| b.count).sum();
    let mut data = Vec::with_capacity(total);
    let mut target = Vec::with_capacity(total);
    for (class, block) in rule.blocks.iter().enumerate() {
        for _ in 0..block.count {
            let mut features: Vec<f64> = block
                .ranges
                .iter()
                .map(|&(lo, hi)| rng.gen_range(lo..hi))
                .collect();
            if let Some(overlay) = rule.overlay {
                overlay(class, &mut features, &mut rng);
            }
            let label = match rule.labeling {
                Labeling::BlockIndex => class,
                Labeling::Derived(f) => f(&features),
            };
            data.push(features);
            target.push(label);
        }
    }
    (data, target)
}

/// Generate the named dataset; `None` for an unknown name.
pub fn get_dataset(name: &str) -> Option<DatasetData> {
    let id = ProfileId::from_name(name)?;
    let rule = rule_for(id);
    let (data, target) = generate(&rule);
    Some(DatasetData {
        data,
        target,
        feature_names: rule.feature_names,
        target_names: rule.target_names,
        description: rule.description.to_string(),
    })
}

/// Catalog of all profiles, with counts derived from the generation rules.
pub fn profiles() -> Vec<DatasetProfile> {
    ProfileId::ALL
        .iter()
        .map(|&id| {
            let rule = rule_for(id);
            DatasetProfile {
                id,
                description: rule.description.to_string(),
                features: rule.blocks[0].ranges.len(),
                samples: rule.blocks.iter().map(|b| b.count).sum(),
                classes: rule.target_names.len(),
            }
        })
        .collect()
}

/// One-hot encode
pub fn one_hot(label: usize, num_classes: usize) -> Vec<f64> {
    let mut v = vec![0.0; num_classes];
    if label < num_classes {
        v[label] = 1.0;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_counts(target: &[usize], classes: usize) -> Vec<usize> {
        let mut counts = vec![0; classes];
        for &t in target {
            counts[t] += 1;
        }
        counts
    }

    #[test]
    fn catalog_matches_generated_shapes() {
        for profile in profiles() {
            let ds = get_dataset(profile.id.name()).unwrap();
            assert_eq!(ds.data.len(), profile.samples, "{}", profile.id.name());
            assert_eq!(ds.target.len(), profile.samples);
            assert!(ds.data.iter().all(|row| row.len() == profile.features));
            assert!(ds.target.iter().all(|&t| t < profile.classes));
            assert_eq!(ds.feature_names.len(), profile.features);
            assert_eq!(ds.target_names.len(), profile.classes);
        }
    }

    #[test]
    fn iris_has_three_contiguous_blocks_of_fifty() {
        let ds = get_dataset("iris").unwrap();
        assert_eq!(label_counts(&ds.target, 3), vec![50, 50, 50]);
        // Class-contiguous generation order, no shuffle.
        assert!(ds.target.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn wine_block_sizes_are_60_70_50() {
        let ds = get_dataset("wine").unwrap();
        assert_eq!(label_counts(&ds.target, 3), vec![60, 70, 50]);
    }

    #[test]
    fn breast_cancer_block_sizes_are_180_210() {
        let ds = get_dataset("breast_cancer").unwrap();
        assert_eq!(label_counts(&ds.target, 2), vec![180, 210]);
    }

    #[test]
    fn iris_features_stay_in_class_ranges() {
        let ds = get_dataset("iris").unwrap();
        for row in &ds.data[0..50] {
            assert!(row[0] >= 4.3 && row[0] < 5.8);
            assert!(row[3] >= 0.1 && row[3] < 0.6);
        }
        for row in &ds.data[100..150] {
            assert!(row[2] >= 4.5 && row[2] < 6.9);
        }
    }

    #[test]
    fn digit_zero_center_is_darker_than_noise_ceiling() {
        let ds = get_dataset("digits").unwrap();
        for row in &ds.data[0..50] {
            for j in 20..44 {
                if (2..=5).contains(&(j % 8)) {
                    assert!(row[j] < 4.0);
                }
            }
        }
    }

    #[test]
    fn digit_one_has_a_dark_vertical_line() {
        let ds = get_dataset("digits").unwrap();
        for row in &ds.data[50..100] {
            for r in 0..8 {
                assert!(row[r * 8 + 3] >= 12.0);
            }
        }
    }

    #[test]
    fn diabetes_labels_follow_the_linear_rule() {
        let ds = get_dataset("diabetes").unwrap();
        assert_eq!(ds.data.len(), 200);
        for (row, &label) in ds.data.iter().zip(&ds.target) {
            let sum: f64 = row.iter().sum();
            assert_eq!(label, if sum * 2.0 > 0.0 { 1 } else { 0 });
            assert!(row.iter().all(|&v| (-0.1..0.1).contains(&v)));
        }
    }

    #[test]
    fn unknown_profile_is_absent() {
        assert!(get_dataset("mnist").is_none());
        assert!(ProfileId::from_name("mnist").is_none());
        assert_eq!(ProfileId::from_name("breast_cancer"), Some(ProfileId::BreastCancer));
    }

    #[test]
    fn one_hot_places_a_single_one() {
        assert_eq!(one_hot(1, 3), vec![0.0, 1.0, 0.0]);
        // Out-of-range label encodes to all zeros.
        assert_eq!(one_hot(5, 3), vec![0.0, 0.0, 0.0]);
    }
}
