/// Severity classes 0..=10.
pub const NUM_CLASSES: usize = 11;

/// Hashed feature space size.
pub const FEATURE_DIM: usize = 4096;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(token: &str) -> u64 {
    token.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Sparse, L2-normalised term counts of lower-cased alphanumeric tokens.
pub fn featurize(text: &str) -> Vec<(usize, f64)> {
    let mut counts: Vec<(usize, f64)> = Vec::new();
    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let index = (fnv1a(&token.to_lowercase()) % FEATURE_DIM as u64) as usize;
        match counts.iter_mut().find(|(i, _)| *i == index) {
            Some((_, count)) => *count += 1.0,
            None => counts.push((index, 1.0)),
        }
    }

    let norm = counts.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, v) in counts.iter_mut() {
            *v /= norm;
        }
    }
    counts
}

#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    weights: Vec<[f64; NUM_CLASSES]>,
    bias: [f64; NUM_CLASSES],
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SeverityClassifier {
    pub fn new() -> Self {
        Self {
            weights: vec![[0.0; NUM_CLASSES]; FEATURE_DIM],
            bias: [0.0; NUM_CLASSES],
        }
    }

    fn logits(&self, features: &[(usize, f64)]) -> [f64; NUM_CLASSES] {
        let mut logits = self.bias;
        for &(i, x) in features {
            for (logit, w) in logits.iter_mut().zip(self.weights[i].iter()) {
                *logit += w * x;
            }
        }
        logits
    }

    pub fn probabilities(&self, features: &[(usize, f64)]) -> [f64; NUM_CLASSES] {
        let logits = self.logits(features);
        let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mut probs = logits.map(|l| (l - max).exp());
        let sum: f64 = probs.iter().sum();
        for p in probs.iter_mut() {
            *p /= sum;
        }
        probs
    }

    /// Most likely class; the lowest class wins ties.
    pub fn predict(&self, features: &[(usize, f64)]) -> usize {
        let probs = self.probabilities(features);
        let mut best = 0;
        for (class, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = class;
            }
        }
        best
    }

    /// One SGD step on cross-entropy loss with L2 weight decay on the touched rows.
    pub fn update(
        &mut self,
        features: &[(usize, f64)],
        label: usize,
        learning_rate: f64,
        weight_decay: f64,
    ) {
        let label = label.min(NUM_CLASSES - 1);
        let probs = self.probabilities(features);

        for class in 0..NUM_CLASSES {
            let target = if class == label { 1.0 } else { 0.0 };
            let gradient = probs[class] - target;
            for &(i, x) in features {
                let w = &mut self.weights[i][class];
                *w -= learning_rate * (gradient * x + weight_decay * *w);
            }
            self.bias[class] -= learning_rate * gradient;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featurize_is_normalised_and_case_insensitive() {
        let a = featurize("Flood flood WATER");
        let b = featurize("flood, Flood; water!");
        assert_eq!(a, b);

        let norm: f64 = a.iter().map(|(_, v)| v * v).sum();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(featurize("  ...  ").is_empty());
    }

    #[test]
    fn test_untrained_model_predicts_lowest_class() {
        let model = SeverityClassifier::new();
        assert_eq!(model.predict(&featurize("anything at all")), 0);
    }

    #[test]
    fn test_learns_separable_vocabulary() {
        let mut model = SeverityClassifier::new();
        let severe = featurize("catastrophic collapse thousands trapped");
        let mild = featurize("light drizzle calm roads open");

        for _ in 0..10 {
            model.update(&severe, 9, 0.1, 0.01);
            model.update(&mild, 1, 0.1, 0.01);
        }

        assert_eq!(model.predict(&severe), 9);
        assert_eq!(model.predict(&mild), 1);
    }
}
