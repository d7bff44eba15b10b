//! Email domain breakdown of the fetched page.

use super::UserRecord;

/// One email domain and its share of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainShare {
    /// Text after the `@`; empty when the address has none.
    pub domain: String,
    /// Records using this domain.
    pub count: usize,
    /// `count` as a percentage of all records on the page.
    pub percent: f64,
}

/// Records grouped by email domain, in the order each domain first appears.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DomainDistribution {
    shares: Vec<DomainShare>,
}

impl DomainDistribution {
    /// Group `records` by email domain.
    ///
    /// An empty slice yields an empty distribution.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::{DomainDistribution, UserId, UserRecord};
    ///
    /// let records = [
    ///     UserRecord::new(UserId::new(1), "Eve", "Holt", "eve.holt@reqres.in", None),
    ///     UserRecord::new(UserId::new(2), "Ann", "Lee", "ann@example.org", None),
    /// ];
    /// let shares = DomainDistribution::from_records(&records);
    /// assert_eq!(shares.shares()[0].domain, "reqres.in");
    /// assert_eq!(shares.shares()[1].percent, 50.0);
    /// ```
    #[must_use]
    pub fn from_records(records: &[UserRecord]) -> Self {
        let mut shares: Vec<DomainShare> = Vec::new();
        for record in records {
            let domain = email_domain(record.email());
            match shares.iter_mut().find(|share| share.domain == domain) {
                Some(share) => share.count += 1,
                None => shares.push(DomainShare {
                    domain: domain.to_owned(),
                    count: 1,
                    percent: 0.0,
                }),
            }
        }
        let total = records.len();
        for share in &mut shares {
            share.percent = percent(share.count, total);
        }
        Self { shares }
    }

    /// Domains in first-seen order.
    #[must_use]
    pub fn shares(&self) -> &[DomainShare] {
        &self.shares
    }

    /// Whether no records were grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

fn email_domain(email: &str) -> &str {
    email.split('@').nth(1).unwrap_or("")
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    let total = u32::try_from(total).unwrap_or(u32::MAX);
    f64::from(count) / f64::from(total) * 100.0
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::UserId;
    use rstest::rstest;

    fn records(emails: &[&str]) -> Vec<UserRecord> {
        emails
            .iter()
            .zip(1_u64..)
            .map(|(email, id)| UserRecord::new(UserId::new(id), "First", "Last", *email, None))
            .collect()
    }

    #[rstest]
    #[case::empty_page(&[], &[])]
    #[case::single_domain(
        &["george.bluth@reqres.in", "janet.weaver@reqres.in"],
        &[("reqres.in", 2, 100.0)]
    )]
    #[case::mixed_page(
        &["a@y.com", "b@reqres.in", "c@y.com", "d@example.org"],
        &[("y.com", 2, 50.0), ("reqres.in", 1, 25.0), ("example.org", 1, 25.0)]
    )]
    #[case::missing_at_sign(&["operator"], &[("", 1, 100.0)])]
    fn groups_by_domain_in_first_seen_order(
        #[case] emails: &[&str],
        #[case] expected: &[(&str, usize, f64)],
    ) {
        let distribution = DomainDistribution::from_records(&records(emails));

        assert_eq!(distribution.shares().len(), expected.len());
        for (share, (domain, count, percent)) in distribution.shares().iter().zip(expected) {
            assert_eq!(share.domain, *domain);
            assert_eq!(share.count, *count);
            assert!((share.percent - percent).abs() < 1e-9, "{share:?}");
        }
    }

    #[test]
    fn empty_page_is_empty() {
        assert!(DomainDistribution::from_records(&[]).is_empty());
    }
}
