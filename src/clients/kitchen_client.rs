//! # Kitchen Client
//!
//! The only way the rest of the crate talks to the [`KitchenActor`](crate::kitchen_actor::KitchenActor).
//! It holds just the sender half of the request channel, so it is cheap to clone
//! into every courier and background task.

use crate::kitchen_actor::{KitchenError, KitchenRequest, Response};
use crate::manager::{KitchenSnapshot, OrderView, Placement};
use crate::model::{Order, OrderId, OrderTicket};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone, Debug)]
pub struct KitchenClient {
    sender: mpsc::Sender<KitchenRequest>,
}

impl KitchenClient {
    pub fn new(sender: mpsc::Sender<KitchenRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> KitchenRequest,
    ) -> Result<T, KitchenError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| KitchenError::ActorClosed)?;
        response.await.map_err(|_| KitchenError::ActorDropped)?
    }

    /// Puts a new order on a shelf.
    ///
    /// Fails with [`KitchenError::InvalidOrder`] if the ticket does not validate.
    #[instrument(skip(self, ticket), fields(name = %ticket.name))]
    pub async fn place(&self, ticket: OrderTicket) -> Result<Placement, KitchenError> {
        debug!(?ticket, "Sending request");
        self.request(|respond_to| KitchenRequest::Place { ticket, respond_to })
            .await
    }

    /// Hands an order to its courier. `Ok(false)` means it was already gone.
    #[instrument(skip(self))]
    pub async fn pickup(&self, id: OrderId) -> Result<bool, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Pickup { id, respond_to })
            .await
    }

    /// Wastes every order whose value has reached zero and returns them.
    #[instrument(skip(self))]
    pub async fn sweep_decay(&self) -> Result<Vec<Order>, KitchenError> {
        self.request(|respond_to| KitchenRequest::SweepDecay { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Option<OrderView>, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Get { id, respond_to })
            .await
    }

    /// Current contents of every shelf.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<KitchenSnapshot, KitchenError> {
        debug!("Sending request");
        self.request(|respond_to| KitchenRequest::Snapshot { respond_to })
            .await
    }
}
