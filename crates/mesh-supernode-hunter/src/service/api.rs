use std::net::{IpAddr, Ipv6Addr};

use crate::domain::{AddrSet, HunterStats, QueryCompletion, ReplyError, ReplyOutcome, SupernodeError};
use crate::ports::{CompletionHandler, SupernodeHunterApi};
use crate::service::SupernodeHunterService;

impl SupernodeHunterApi for SupernodeHunterService {
    fn add_supernode(&mut self, addr: IpAddr) -> Result<(), SupernodeError> {
        self.hunter.add_supernode(addr)
    }

    fn remove_supernode(&mut self, addr: IpAddr) -> Result<(), SupernodeError> {
        self.hunter.remove_supernode(addr)
    }

    fn list_supernodes(&self) -> Vec<Ipv6Addr> {
        self.hunter.list_supernodes()
    }

    fn confirmed_supernodes(&self) -> AddrSet {
        self.hunter.confirmed_supernodes().clone()
    }

    fn stats(&self) -> HunterStats {
        self.hunter.stats()
    }
}

impl CompletionHandler for SupernodeHunterService {
    fn on_completion(&mut self, completion: QueryCompletion) -> Result<ReplyOutcome, ReplyError> {
        self.hunter.on_reply(completion)
    }
}
