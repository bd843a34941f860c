//! Brownian bridge ordering of normal draws on a uniform time grid.
//!
//! The first draw fixes the terminal value of the Brownian motion, the next
//! ones fill successive midpoints. Feeding low-discrepancy coordinates in
//! that order puts the best-distributed dimensions on the path features that
//! carry most of the variance.

/// Precomputed bridge construction for `n` unit time steps.
///
/// # Examples
///
/// ```
/// use pricer_pricing::rng::BrownianBridge;
///
/// let mut bridge = BrownianBridge::new(4);
/// let mut increments = [0.0; 4];
/// bridge.transform(&[1.0, 0.0, 0.0, 0.0], &mut increments);
/// // Only the terminal draw is non-zero: the path is a straight line to 2.
/// assert_eq!(increments, [0.5, 0.5, 0.5, 0.5]);
/// ```
#[derive(Clone, Debug)]
pub struct BrownianBridge {
    bridge_index: Vec<usize>,
    left_index: Vec<usize>,
    right_index: Vec<usize>,
    left_weight: Vec<f64>,
    right_weight: Vec<f64>,
    std_dev: Vec<f64>,
    // Scratch Brownian levels W(1..=n).
    levels: Vec<f64>,
}

impl BrownianBridge {
    /// Builds the construction order for `n_steps` steps (at least one).
    pub fn new(n_steps: usize) -> Self {
        let n = n_steps.max(1);
        let mut filled = vec![false; n];
        let mut bridge_index = vec![0; n];
        let mut left_index = vec![0; n];
        let mut right_index = vec![0; n];
        let mut left_weight = vec![0.0; n];
        let mut right_weight = vec![0.0; n];
        let mut std_dev = vec![0.0; n];

        // Grid point i sits at time i + 1; time 0 is the fixed origin.
        filled[n - 1] = true;
        bridge_index[0] = n - 1;
        std_dev[0] = (n as f64).sqrt();

        let mut j = 0;
        for i in 1..n {
            while filled[j] {
                j += 1;
            }
            let mut k = j;
            while !filled[k] {
                k += 1;
            }
            // Points j..k are empty, k is known, j - 1 (or the origin) is known.
            let l = j + ((k - 1 - j) >> 1);
            filled[l] = true;

            let t_left = j as f64;
            let t_mid = (l + 1) as f64;
            let t_right = (k + 1) as f64;
            let span = t_right - t_left;
            bridge_index[i] = l;
            left_index[i] = j;
            right_index[i] = k;
            left_weight[i] = (t_right - t_mid) / span;
            right_weight[i] = (t_mid - t_left) / span;
            std_dev[i] = ((t_mid - t_left) * (t_right - t_mid) / span).sqrt();

            j = k + 1;
            if j >= n {
                j = 0;
            }
        }

        Self {
            bridge_index,
            left_index,
            right_index,
            left_weight,
            right_weight,
            std_dev,
            levels: vec![0.0; n],
        }
    }

    /// Number of steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.bridge_index.len()
    }

    /// Maps bridge-ordered draws `z` to standard normal step increments.
    ///
    /// Both slices must hold [`n_steps`](Self::n_steps) values.
    pub fn transform(&mut self, z: &[f64], increments: &mut [f64]) {
        let mut levels = std::mem::take(&mut self.levels);
        self.build_levels(z, &mut levels);
        let mut previous = 0.0;
        for (dw, &w) in increments.iter_mut().zip(&levels) {
            *dw = w - previous;
            previous = w;
        }
        self.levels = levels;
    }

    fn build_levels(&self, z: &[f64], levels: &mut [f64]) {
        let n = self.n_steps();
        levels[n - 1] = self.std_dev[0] * z[0];
        for i in 1..n {
            let j = self.left_index[i];
            let k = self.right_index[i];
            let l = self.bridge_index[i];
            let left = if j == 0 { 0.0 } else { levels[j - 1] };
            levels[l] = self.left_weight[i] * left
                + self.right_weight[i] * levels[k]
                + self.std_dev[i] * z[i];
        }
    }
}
